//! Helium sort, a stable block merge sort that adapts to the scratch memory it is given.
//!
//! With `n / 2` elements of scratch it is a plain merge sort, with `sqrt(n) + 2n / sqrt(n)` a
//! block merge sort with external tag tables, and with less memory down to none at all it
//! harvests distinct values from the input to serve as block tags and swap buffer. Inputs with
//! almost no distinct values, or with at most 256 elements, use a rotation based in-place merge
//! sort.
//!
//! ```ignore
//! let mut v = [5, 3, 3, 1, 4, 2];
//! heliumsort::sort_with_memory(&mut v, heliumsort::MemoryBudget::Uranium)?;
//! assert_eq!(v, [1, 2, 3, 3, 4, 5]);
//! ```

use std::cmp::Ordering;
use std::ops::Range;

mod block;
mod budget;
mod context;
mod dispatch;
mod error;
mod keys;
mod loops;
mod merge;
mod rotate;
mod runs;

pub use budget::MemoryBudget;
pub use error::SortError;

/// Length of the runs that are insertion sorted before merging starts.
pub(crate) const RUN_SIZE: usize = 32;
/// Inputs up to this length always use the in-place merge sort.
pub(crate) const SMALL_SORT: usize = 256;
/// A sorted suffix shorter than this is not worth harvesting keys from directly.
pub(crate) const MIN_SORTED_UNIQUE: usize = 8;
/// With at most this many distinct values the in-place merge sort is used.
pub(crate) const MAX_STRAT5_UNIQUE: usize = 8;
/// Strictly descending runs at least this long are reversed up front.
pub(crate) const MIN_REV_RUN_SIZE: usize = 8;
/// Merges where one side is at most this long are done by rotation.
pub(crate) const SMALL_MERGE: usize = 4;
/// First block length of strategy 4B, `2^ceil(log2(sqrt(2 * RUN_SIZE)))`.
pub(crate) const SQRT_TWO_RUNS: usize = 8;

/// Sorts `v` without allocating.
///
/// Equal elements keep their relative order.
pub fn sort<T: Ord + Copy>(v: &mut [T]) {
    sort_by(v, T::cmp);
}

/// Sorts `v` with the comparator `compare` without allocating.
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    dispatch::sort_without_scratch(v, compare);
}

/// Sorts `v`, using at most `budget` elements of scratch memory.
///
/// Fails only if the scratch memory can't be reserved, in which case `v` is left untouched.
pub fn sort_with_memory<T: Ord + Copy>(
    v: &mut [T],
    budget: impl Into<MemoryBudget>,
) -> Result<(), SortError> {
    sort_by_with_memory(v, budget, T::cmp)
}

/// Sorts `v` with `compare`, using at most `budget` elements of scratch memory.
pub fn sort_by_with_memory<T, F>(
    v: &mut [T],
    budget: impl Into<MemoryBudget>,
    compare: F,
) -> Result<(), SortError>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    dispatch::sort_slice(v, budget.into(), compare).map(|_| ())
}

/// Sorts the elements of `v` inside `range`, leaving the rest of `v` alone.
pub fn sort_range_by<T, F>(
    v: &mut [T],
    range: Range<usize>,
    budget: impl Into<MemoryBudget>,
    compare: F,
) -> Result<(), SortError>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if range.start > range.end || range.end > len {
        return Err(SortError::InvalidRange {
            start: range.start,
            end: range.end,
            len,
        });
    }

    sort_by_with_memory(&mut v[range], budget, compare)
}
