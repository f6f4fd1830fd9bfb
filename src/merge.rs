use std::cmp::Ordering::{self, Greater, Less};

use crate::context::SortContext;
use crate::SMALL_MERGE;

/// Which run wins ties.
///
/// Merging `[a, m)` with `[m, b)` is stable with `Left`. `Right` is used when the left range
/// holds elements that came from the later run, as happens in the block boundary merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// `x >= y` for `Left`, `x > y` for `Right`.
    #[inline]
    fn ge(self, ord: Ordering) -> bool {
        match self {
            Side::Left => ord != Less,
            Side::Right => ord == Greater,
        }
    }

    /// `x <= y` for `Left`, `x < y` for `Right`.
    #[inline]
    fn le(self, ord: Ordering) -> bool {
        match self {
            Side::Left => ord != Greater,
            Side::Right => ord == Less,
        }
    }

    /// `x > y` for `Left`, `x >= y` for `Right`.
    #[inline]
    fn gt(self, ord: Ordering) -> bool {
        match self {
            Side::Left => ord == Greater,
            Side::Right => ord != Less,
        }
    }

    #[inline]
    pub(crate) fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Scratch a buffered merge goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scratch {
    External,
    Internal,
}

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// First index in `[a, b)` whose element is `>= value` (`Left`) or `> value` (`Right`).
    pub(crate) fn search(&mut self, side: Side, mut a: usize, mut b: usize, value: &T) -> usize {
        while a < b {
            let m = a + ((b - a) >> 1);

            if side.ge(self.compare_to(m, value)) {
                b = m;
            } else {
                a = m + 1;
            }
        }

        a
    }

    /// Returns true if `[a, m)` and `[m, b)` needed no merge, or were merged with one rotation.
    pub(crate) fn check_bounds(&mut self, a: usize, m: usize, b: usize) -> bool {
        if self.compare(m - 1, m) != Greater {
            return true;
        }

        if self.compare(a, b - 1) == Greater {
            self.rotate(a, m, b);
            return true;
        }

        false
    }

    /// Skips the elements that are already in place at both ends of the merge.
    pub(crate) fn reduce_bounds(&mut self, a: usize, m: usize, b: usize) -> (usize, usize) {
        let first_right = self.v[m];
        let a = self.search(Side::Right, a, m - 1, &first_right);

        let last_left = self.v[m - 1];
        let b = self.search(Side::Left, m, b, &last_left);

        (a, b)
    }

    fn merge_in_place_fw(&mut self, side: Side, a: usize, m: usize, b: usize) {
        let mut s = a;
        let mut l = m;

        while s < l && l < b {
            if side.gt(self.compare(s, l)) {
                let value = self.v[s];
                let p = self.search(side, l, b, &value);

                if p > l {
                    self.rotate(s, l, p);
                    s += p - l;
                    l = p;
                } else {
                    // Only reachable with an inconsistent comparator.
                    s += 1;
                }
            } else {
                s += 1;
            }
        }
    }

    fn merge_in_place_bw(&mut self, side: Side, a: usize, m: usize, b: usize) {
        let mut e = b;
        let mut l = m;

        while e > l && l > a {
            if side.gt(self.compare(l - 1, e - 1)) {
                let value = self.v[e - 1];
                let p = self.search(side.flip(), a, l - 1, &value);

                self.rotate(p, l, e);
                e -= l - p;
                l = p;
            } else {
                e -= 1;
            }
        }
    }

    /// Rotation based merge, no scratch needed.
    pub(crate) fn merge_in_place(&mut self, side: Side, a: usize, m: usize, b: usize) {
        if m - a > b - m {
            self.merge_in_place_bw(side, a, m, b);
        } else {
            self.merge_in_place_fw(side, a, m, b);
        }
    }

    /// Swaps `[a, m)` into the internal buffer and merges it back, the buffer keeps its values.
    fn merge_with_buffer_fw(&mut self, side: Side, a: usize, m: usize, b: usize) {
        let left_len = m - a;
        let buf = self.buf_pos;
        self.block_swap(a, buf, left_len);

        let end = buf + left_len;
        let mut l = buf;
        let mut r = m;
        let mut o = a;

        while l < end && r < b {
            if side.le(self.compare(l, r)) {
                self.v.swap(o, l);
                l += 1;
            } else {
                self.v.swap(o, r);
                r += 1;
            }
            o += 1;
        }

        while l < end {
            self.v.swap(o, l);
            o += 1;
            l += 1;
        }
    }

    fn merge_with_buffer_bw(&mut self, side: Side, a: usize, m: usize, b: usize) {
        let right_len = b - m;
        let buf = self.buf_pos;
        self.block_swap(m, buf, right_len);

        let mut l = m;
        let mut r = buf + right_len;
        let mut o = b;

        while l > a && r > buf {
            o -= 1;
            if side.ge(self.compare(r - 1, l - 1)) {
                r -= 1;
                self.v.swap(o, r);
            } else {
                l -= 1;
                self.v.swap(o, l);
            }
        }

        while r > buf {
            o -= 1;
            r -= 1;
            self.v.swap(o, r);
        }
    }

    /// Copies `[a, m)` into the external buffer and merges it back.
    fn merge_oop_fw(&mut self, side: Side, a: usize, m: usize, b: usize) {
        let left_len = m - a;
        self.ext_buf[..left_len].copy_from_slice(&self.v[a..m]);

        let mut l = 0;
        let mut r = m;
        let mut o = a;

        while l < left_len && r < b {
            if side.le((self.cmp)(&self.ext_buf[l], &self.v[r])) {
                self.v[o] = self.ext_buf[l];
                l += 1;
            } else {
                self.v[o] = self.v[r];
                r += 1;
            }
            o += 1;
        }

        let rest = left_len - l;
        self.v[o..o + rest].copy_from_slice(&self.ext_buf[l..left_len]);
    }

    fn merge_oop_bw(&mut self, side: Side, a: usize, m: usize, b: usize) {
        let right_len = b - m;
        self.ext_buf[..right_len].copy_from_slice(&self.v[m..b]);

        let mut l = m;
        let mut r = right_len;
        let mut o = b;

        while l > a && r > 0 {
            o -= 1;
            if side.ge((self.cmp)(&self.ext_buf[r - 1], &self.v[l - 1])) {
                r -= 1;
                self.v[o] = self.ext_buf[r];
            } else {
                l -= 1;
                self.v[o] = self.v[l];
            }
        }

        self.v[o - r..o].copy_from_slice(&self.ext_buf[..r]);
    }

    fn scratch_for(&self, len: usize) -> Option<Scratch> {
        if len <= self.ext_buf.len() {
            Some(Scratch::External)
        } else if self.has_int_buf && len <= self.buf_len {
            Some(Scratch::Internal)
        } else {
            None
        }
    }

    fn merge_buffered(&mut self, scratch: Scratch, side: Side, a: usize, m: usize, b: usize) {
        let forward = m - a <= b - m;
        match (scratch, forward) {
            (Scratch::External, true) => self.merge_oop_fw(side, a, m, b),
            (Scratch::External, false) => self.merge_oop_bw(side, a, m, b),
            (Scratch::Internal, true) => self.merge_with_buffer_fw(side, a, m, b),
            (Scratch::Internal, false) => self.merge_with_buffer_bw(side, a, m, b),
        }
    }

    /// Merges if the shorter side is tiny or fits some scratch, returns false otherwise.
    pub(crate) fn opti_smart_merge(&mut self, side: Side, a: usize, m: usize, b: usize) -> bool {
        let short = (m - a).min(b - m);

        if short <= SMALL_MERGE {
            self.merge_in_place(side, a, m, b);
            return true;
        }

        match self.scratch_for(short) {
            Some(scratch) => {
                self.merge_buffered(scratch, side, a, m, b);
                true
            }
            None => false,
        }
    }

    pub(crate) fn smart_merge(&mut self, side: Side, a: usize, m: usize, b: usize) {
        if !self.opti_smart_merge(side, a, m, b) {
            self.merge_in_place(side, a, m, b);
        }
    }

    /// Pairwise merge without scratch, used by the in-place merge sort.
    pub(crate) fn merge_in_place_checked(&mut self, a: usize, m: usize, b: usize) {
        if self.check_bounds(a, m, b) {
            return;
        }

        let (a, b) = self.reduce_bounds(a, m, b);
        self.merge_in_place(Side::Left, a, m, b);
    }

    /// Pairwise merge through the external buffer, which must hold the shorter side.
    pub(crate) fn merge_oop(&mut self, a: usize, m: usize, b: usize) {
        self.merge_checked(Scratch::External, a, m, b);
    }

    /// Pairwise merge through the internal buffer, which must hold the shorter side.
    pub(crate) fn merge_with_buffer(&mut self, a: usize, m: usize, b: usize) {
        self.merge_checked(Scratch::Internal, a, m, b);
    }

    fn merge_checked(&mut self, scratch: Scratch, a: usize, m: usize, b: usize) {
        if self.check_bounds(a, m, b) {
            return;
        }

        let (a, b) = self.reduce_bounds(a, m, b);
        if (m - a).min(b - m) <= SMALL_MERGE {
            self.merge_in_place(Side::Left, a, m, b);
        } else {
            self.merge_buffered(scratch, Side::Left, a, m, b);
        }
    }

    /// Tries a pairwise merge of `[a, m)` and `[m, b)` with the scratch at hand.
    pub(crate) fn opti_merge(&mut self, a: usize, m: usize, b: usize) -> bool {
        let (a, b) = self.reduce_bounds(a, m, b);
        self.opti_smart_merge(Side::Left, a, m, b)
    }
}
