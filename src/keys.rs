use std::cmp::Ordering::{self, Equal, Less};

use crate::context::SortContext;
use crate::merge::Side;
use crate::{MAX_STRAT5_UNIQUE, MIN_SORTED_UNIQUE};

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Scans `[a, p)` backwards for values not yet in the sorted keys `[p, b)`, collecting up to
    /// `wanted` keys in total, then moves them to end at `to`.
    ///
    /// Every key is the last occurrence of its value, the other elements keep their order.
    fn find_keys_unsorted(
        &mut self,
        a: usize,
        mut p: usize,
        b: usize,
        wanted: usize,
        to: usize,
    ) -> usize {
        let mut found = b - p;
        let mut i = p;

        while i > a && found < wanted {
            let value = self.v[i - 1];
            let pos = self.search(Side::Left, p, p + found, &value) - p;

            if pos == found || self.compare_to(p + pos, &value) == Ordering::Greater {
                self.rotate_external(i, p, p + found);
                found += 1;
                p = i - 1;
                self.insert_to_right(i - 1, p + pos);
            }

            i -= 1;
        }

        self.rotate_external(p, p + found, to);
        found
    }

    /// Collects up to `wanted` distinct values from the sorted range `[a, b)`.
    ///
    /// With enough keys they end up at the end of the range, otherwise at its start.
    fn find_keys_sorted(&mut self, a: usize, b: usize, wanted: usize) -> usize {
        let mut found = 1;
        let mut p = b - 1;
        let mut i = p;

        while i > a && found < wanted {
            if self.compare(i - 1, i) != Equal {
                self.rotate_external(i, p, p + found);
                found += 1;
                p = i - 1;
            }

            i -= 1;
        }

        if found == wanted {
            self.rotate_external(p, p + found, b);
        } else {
            self.rotate_external(a, p, p + found);
        }

        found
    }

    /// Harvests up to `wanted` distinct values into a sorted key region at the end of `[a, b)`.
    ///
    /// Returns `None` if the range turned out to be sorted already.
    pub(crate) fn find_keys(&mut self, a: usize, b: usize, wanted: usize) -> Option<usize> {
        let p = self.presorted_idx(a, b);
        if p == a {
            return None;
        }

        if b - p < MIN_SORTED_UNIQUE {
            return Some(self.find_keys_unsorted(a, b - 1, b, wanted, b));
        }

        let found = self.find_keys_sorted(p, b, wanted);
        if found == wanted {
            return Some(found);
        }

        Some(self.find_keys_unsorted(a, p, p + found, wanted, b))
    }

    /// Returns true if `[a, b)` holds at most `MAX_STRAT5_UNIQUE` distinct values.
    ///
    /// Stops as soon as one more has been seen, which on most inputs is within a few elements.
    pub(crate) fn has_few_distinct(&mut self, a: usize, b: usize) -> bool {
        if b - a <= MAX_STRAT5_UNIQUE {
            return true;
        }

        let mut seen = [self.v[b - 1]; MAX_STRAT5_UNIQUE + 1];
        let mut count = 1;

        for i in (a..b - 1).rev() {
            let value = self.v[i];

            let mut lo = 0;
            let mut hi = count;
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                if (self.cmp)(&seen[mid], &value) == Less {
                    lo = mid + 1;
                } else {
                    hi = mid;
                }
            }

            if lo == count || (self.cmp)(&seen[lo], &value) != Equal {
                if count == MAX_STRAT5_UNIQUE {
                    return false;
                }

                seen.copy_within(lo..count, lo + 1);
                seen[lo] = value;
                count += 1;
            }
        }

        true
    }
}
