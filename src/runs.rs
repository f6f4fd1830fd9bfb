use std::cmp::Ordering::{self, Greater, Less};

use crate::context::SortContext;
use crate::merge::Side;
use crate::{MIN_REV_RUN_SIZE, RUN_SIZE};

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Binary insertion sort of `[a, b)`.
    pub(crate) fn insert_sort(&mut self, a: usize, b: usize) {
        for i in a + 1..b {
            if self.compare(i, i - 1) == Less {
                let value = self.v[i];
                let p = self.search(Side::Right, a, i, &value);
                self.insert_to_left(i, p);
            }
        }
    }

    /// Insertion sorts `[a, b)` in chunks of `RUN_SIZE`, stopping after the chunk holding `p`.
    ///
    /// Everything from `p` on is already sorted, so later chunks have nothing to do.
    pub(crate) fn sort_runs(&mut self, a: usize, b: usize, p: usize) {
        let next_boundary = a + ((p - a) / RUN_SIZE + 1) * RUN_SIZE;
        let end = if p != b && next_boundary < b {
            next_boundary
        } else {
            b
        };

        let mut i = a;
        while i + RUN_SIZE < end {
            self.insert_sort(i, i + RUN_SIZE);
            i += RUN_SIZE;
        }

        if i < end {
            self.insert_sort(i, end);
        }
    }

    /// Reverses every strictly descending run of at least `MIN_REV_RUN_SIZE` elements.
    fn reverse_runs(&mut self, a: usize, b: usize) {
        let mut l = a;

        while l < b {
            let mut i = l;
            while i + 1 < b && self.compare(i, i + 1) == Greater {
                i += 1;
            }

            if i - l >= MIN_REV_RUN_SIZE {
                self.v[l..=i].reverse();
            }
            l = i + 1;
        }
    }

    /// Reverses descending runs, then returns the start of the longest sorted suffix of
    /// `[a, b)`. Returns `a` if the whole range is sorted.
    pub(crate) fn presorted_idx(&mut self, a: usize, b: usize) -> usize {
        self.reverse_runs(a, b);

        let mut i = b;
        while i > a + 1 {
            i -= 1;
            if self.compare(i, i - 1) == Less {
                return i;
            }
        }

        a
    }
}
