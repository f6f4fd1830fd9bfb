use std::cmp::Ordering;

use log::{debug, trace};

use crate::budget::{MemoryBudget, Plan};
use crate::context::SortContext;
use crate::error::SortError;
use crate::loops::HeliumMode;
use crate::rotate::Rotation;
use crate::{MAX_STRAT5_UNIQUE, SQRT_TWO_RUNS};

/// What a sort call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// The input was found sorted, possibly after reversing descending runs.
    Presorted,
    /// Rotation based merge sort, for short inputs and inputs with very few distinct values.
    InPlace,
    Uranium,
    Hydrogen,
    Helium3A,
    Helium3B,
    Helium3C,
    Helium4A,
    Helium4B,
}

fn try_alloc<U: Copy>(len: usize, fill: U) -> Result<Vec<U>, SortError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| SortError::Alloc {
            elements: len,
            source,
        })?;
    buf.resize(len, fill);

    Ok(buf)
}

/// Sorts `v` with at most `budget` elements of scratch.
///
/// All scratch is reserved before `v` is touched, so on error `v` is unchanged.
pub(crate) fn sort_slice<T, F>(
    v: &mut [T],
    budget: MemoryBudget,
    cmp: F,
) -> Result<Strategy, SortError>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    let plan = Plan::new(n, budget);

    let mut ctx = SortContext::new(v, cmp);
    ctx.reserve(plan)?;

    let strategy = ctx.execute(plan);
    debug!("sorted {n} elements with {strategy:?}, planned {plan:?}");

    Ok(strategy)
}

/// Sorts `v` with keys and buffer harvested from `v` itself, never allocating.
pub(crate) fn sort_without_scratch<T, F>(v: &mut [T], cmp: F) -> Strategy
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    let plan = Plan::new(n, MemoryBudget::Helium3C);
    debug_assert!(matches!(
        plan,
        Plan::InPlace | Plan::Helium3C { buf_len: 0, .. }
    ));

    let strategy = SortContext::new(v, cmp).execute(plan);
    debug!("sorted {n} elements with {strategy:?} without scratch");

    strategy
}

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    fn reserve(&mut self, plan: Plan) -> Result<(), SortError> {
        let (buf_len, index_len, key_len) = match plan {
            Plan::InPlace => (0, 0, 0),
            Plan::Uranium { buf_len } => (buf_len, 0, 0),
            Plan::Hydrogen {
                key_count, buf_len, ..
            } => (buf_len, key_count, key_count),
            Plan::Helium3A {
                key_count, buf_len, ..
            } => (buf_len, 0, key_count),
            Plan::Helium3B { buf_len, .. } | Plan::Helium3C { buf_len, .. } => (buf_len, 0, 0),
        };

        if let Some(&fill) = self.v.first() {
            if buf_len != 0 {
                self.ext_buf = try_alloc(buf_len, fill)?;
            }
        }
        if index_len != 0 {
            self.indices = try_alloc(index_len, 0)?;
        }
        if key_len != 0 {
            self.keys = try_alloc(key_len, 0)?;
        }

        Ok(())
    }

    /// Settles inputs that need no block merging at all, otherwise sorts the initial runs.
    fn presort(&mut self) -> Option<Strategy> {
        let n = self.v.len();
        let p = self.presorted_idx(0, n);
        if p == 0 {
            return Some(Strategy::Presorted);
        }

        if self.has_few_distinct(0, n) {
            trace!("at most {MAX_STRAT5_UNIQUE} distinct values, sorting in place");
            self.in_place_merge_sort(0, n, p);
            return Some(Strategy::InPlace);
        }

        self.sort_runs(0, n, p);
        None
    }

    /// Harvests `wanted` keys, returns how many were found, or the strategy that already
    /// finished the sort.
    fn harvest(&mut self, wanted: usize) -> Result<usize, Strategy> {
        let n = self.v.len();
        let Some(found) = self.find_keys(0, n, wanted) else {
            return Err(Strategy::Presorted);
        };
        trace!("harvested {found} of {wanted} keys");

        if found <= MAX_STRAT5_UNIQUE {
            trace!("only {found} distinct values, sorting in place");
            self.in_place_merge_sort(0, n, n);
            return Err(Strategy::InPlace);
        }

        let e = n - found;
        self.sort_runs(0, e, e);
        Ok(found)
    }

    fn execute(&mut self, plan: Plan) -> Strategy {
        let n = self.v.len();

        match plan {
            Plan::InPlace => {
                let p = self.presorted_idx(0, n);
                if p == 0 {
                    return Strategy::Presorted;
                }

                self.in_place_merge_sort(0, n, p);
                Strategy::InPlace
            }
            Plan::Uranium { .. } => {
                if let Some(strategy) = self.presort() {
                    return strategy;
                }

                self.uranium_loop(0, n);
                Strategy::Uranium
            }
            Plan::Hydrogen { block_len, .. } => {
                if let Some(strategy) = self.presort() {
                    return strategy;
                }

                self.block_len = block_len;
                self.hydrogen_loop(0, n);
                Strategy::Hydrogen
            }
            Plan::Helium3A { block_len, .. } => {
                if let Some(strategy) = self.presort() {
                    return strategy;
                }

                self.block_len = block_len;
                self.helium_loop(0, n, n, HeliumMode::KeyTable);
                Strategy::Helium3A
            }
            Plan::Helium3B {
                block_len,
                key_count,
                ..
            } => {
                let found = match self.harvest(key_count) {
                    Ok(found) => found,
                    Err(strategy) => return strategy,
                };

                let e = n - found;
                self.block_len = block_len;
                self.key_pos = e;
                self.key_len = found;

                if found == key_count {
                    self.helium_loop(0, e, n, HeliumMode::ArrayKeys);
                    Strategy::Helium3B
                } else {
                    self.helium_loop(0, e, n, HeliumMode::GrowBlocks);
                    Strategy::Helium4A
                }
            }
            Plan::Helium3C {
                block_len,
                key_count,
                ..
            } => {
                let wanted = block_len + key_count;
                let found = match self.harvest(wanted) {
                    Ok(found) => found,
                    Err(strategy) => return strategy,
                };

                let e = n - found;
                let ext_len = self.ext_buf.len();
                self.has_int_buf = true;
                self.key_pos = e;

                if found == wanted {
                    // Keys first, the largest values serve as buffer.
                    self.block_len = block_len;
                    self.key_len = key_count;
                    self.buf_pos = n - block_len;
                    self.buf_len = block_len;
                    self.rotation = Rotation::select(block_len, ext_len);

                    self.helium_loop(0, e, n, HeliumMode::ArrayKeys);
                    Strategy::Helium3C
                } else {
                    self.block_len = SQRT_TWO_RUNS;
                    self.key_len = found;
                    self.buf_pos = e;
                    self.buf_len = found;
                    self.rotation = Rotation::select(found, ext_len);

                    self.helium_loop(0, e, n, HeliumMode::SplitKeys);
                    Strategy::Helium4B
                }
            }
        }
    }
}
