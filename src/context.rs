use std::cmp::Ordering;

use crate::rotate::Rotation;

/// State shared by every merge of a single sort call.
///
/// The internal buffer `[buf_pos, buf_pos + buf_len)` and the key region
/// `[key_pos, key_pos + key_len)` are parts of `v` itself. They never overlap the range that is
/// being merged, and only share storage with each other in strategy 4B, where the keys that are
/// not needed as block tags serve as buffer.
pub(crate) struct SortContext<'a, T, F> {
    pub v: &'a mut [T],
    pub cmp: F,

    /// External buffer, empty if the call has no element scratch.
    pub ext_buf: Vec<T>,
    /// Block permutation, Hydrogen only.
    pub indices: Vec<usize>,
    /// Block origin tags, Hydrogen and 3A only.
    pub keys: Vec<usize>,

    pub block_len: usize,
    pub buf_pos: usize,
    pub buf_len: usize,
    pub has_int_buf: bool,
    pub key_pos: usize,
    pub key_len: usize,

    pub rotation: Rotation,
}

impl<'a, T, F> SortContext<'a, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    pub(crate) fn new(v: &'a mut [T], cmp: F) -> Self {
        Self {
            v,
            cmp,
            ext_buf: Vec::new(),
            indices: Vec::new(),
            keys: Vec::new(),
            block_len: 0,
            buf_pos: 0,
            buf_len: 0,
            has_int_buf: false,
            key_pos: 0,
            key_len: 0,
            rotation: Rotation::External,
        }
    }

    #[inline]
    pub(crate) fn compare(&mut self, a: usize, b: usize) -> Ordering {
        (self.cmp)(&self.v[a], &self.v[b])
    }

    #[inline]
    pub(crate) fn compare_to(&mut self, a: usize, value: &T) -> Ordering {
        (self.cmp)(&self.v[a], value)
    }

    /// Swaps `[a, a + len)` with `[b, b + len)`, the two ranges must not overlap.
    pub(crate) fn block_swap(&mut self, a: usize, b: usize, len: usize) {
        if len == 0 || a == b {
            return;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        debug_assert!(lo + len <= hi);

        let (left, right) = self.v.split_at_mut(hi);
        left[lo..lo + len].swap_with_slice(&mut right[..len]);
    }

    /// Moves `v[from]` to `to <= from`, shifting the elements in between one to the right.
    pub(crate) fn insert_to_left(&mut self, from: usize, to: usize) {
        self.v[to..=from].rotate_right(1);
    }

    /// Moves `v[from]` to `to >= from`, shifting the elements in between one to the left.
    pub(crate) fn insert_to_right(&mut self, from: usize, to: usize) {
        self.v[from..=to].rotate_left(1);
    }
}
