use std::cmp::Ordering;

use crate::context::SortContext;
use crate::merge::Side;
use crate::RUN_SIZE;

/// Which tags the block merges of a helium loop use, and how block lengths evolve per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeliumMode {
    /// 3A, tags in the external key table.
    KeyTable,
    /// 3B and 3C, a full set of harvested keys, fixed block length.
    ArrayKeys,
    /// 4A, too few keys, the block length grows until they suffice.
    GrowBlocks,
    /// 4B, too few keys, blocks of about `sqrt(2r)` and the unused keys serve as buffer.
    SplitKeys,
}

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Merges every pair of adjacent width `r` runs in `[a, b)`, including a short last pair.
    fn merge_level(&mut self, a: usize, b: usize, r: usize, merge: fn(&mut Self, usize, usize, usize)) {
        let two_r = r * 2;
        let mut i = a;

        while i + two_r < b {
            merge(self, i, i + r, i + two_r);
            i += two_r;
        }

        if i + r < b {
            merge(self, i, i + r, b);
        }
    }

    /// Bottom up merge sort of `[a, b)` through an external buffer of at least `(b - a) / 2`.
    pub(crate) fn uranium_loop(&mut self, a: usize, b: usize) {
        let mut r = RUN_SIZE;
        while r < b - a {
            self.merge_level(a, b, r, Self::merge_oop);
            r *= 2;
        }
    }

    /// Buffered merges while the runs fit the external buffer, then block merges.
    pub(crate) fn hydrogen_loop(&mut self, a: usize, b: usize) {
        let mut r = RUN_SIZE;

        while r <= self.ext_buf.len() && r < b - a {
            self.merge_level(a, b, r, Self::merge_oop);
            r *= 2;
        }

        while r < b - a {
            self.merge_level(a, b, r, Self::hydrogen_combine);
            r *= 2;
        }
    }

    /// Strategy 5, rotation merges only. `[p, b)` is known to be sorted.
    pub(crate) fn in_place_merge_sort(&mut self, a: usize, b: usize, p: usize) {
        self.sort_runs(a, b, p);

        let mut r = RUN_SIZE;
        while r < b - a {
            self.merge_level(a, b, r, Self::merge_in_place_checked);
            r *= 2;
        }
    }

    fn helium_combine_array_keys(&mut self, a: usize, m: usize, b: usize) {
        self.helium_combine(a, m, b, false);
    }

    fn helium_combine_key_table(&mut self, a: usize, m: usize, b: usize) {
        self.helium_combine(a, m, b, true);
    }

    /// Fits the block length to a merge width of `two_r` with `key_len` harvested keys.
    fn adapt_blocks(&mut self, mode: HeliumMode, two_r: usize) {
        match mode {
            HeliumMode::GrowBlocks => {
                while two_r / self.block_len + 1 > self.key_len {
                    self.block_len *= 2;
                }
            }
            HeliumMode::SplitKeys => {
                let mut block_len = self.block_len;
                while block_len * block_len < two_r {
                    block_len *= 2;
                }

                let tag_count = two_r / block_len + 1;
                if tag_count < self.key_len {
                    self.buf_len = self.key_len - tag_count;
                    self.buf_pos = self.key_pos + tag_count;
                    self.has_int_buf = true;
                } else {
                    while two_r / block_len + 1 > self.key_len {
                        block_len *= 2;
                    }
                    self.buf_len = 0;
                    self.has_int_buf = false;
                }

                self.block_len = block_len;
            }
            HeliumMode::KeyTable | HeliumMode::ArrayKeys => {}
        }
    }

    /// Sorts the data in `[a, m)`, then merges the keys and buffer in `[m, b)` back into it.
    ///
    /// Runs must be presorted to `RUN_SIZE`.
    pub(crate) fn helium_loop(&mut self, a: usize, m: usize, b: usize, mode: HeliumMode) {
        let len = m - a;
        let mut r = RUN_SIZE;

        while r <= self.ext_buf.len() && r < len {
            self.merge_level(a, m, r, Self::merge_oop);
            r *= 2;
        }

        while self.has_int_buf && r <= self.buf_len && r < len {
            self.merge_level(a, m, r, Self::merge_with_buffer);
            r *= 2;
        }

        let combine: fn(&mut Self, usize, usize, usize) = match mode {
            HeliumMode::KeyTable => Self::helium_combine_key_table,
            _ => Self::helium_combine_array_keys,
        };
        let adaptive = matches!(mode, HeliumMode::GrowBlocks | HeliumMode::SplitKeys);

        while r < len {
            let two_r = r * 2;
            self.adapt_blocks(mode, two_r);

            let mut i = a;
            while i + two_r < m {
                combine(self, i, i + r, i + two_r);
                i += two_r;
            }

            if i + r < m {
                if adaptive && m - i - r <= self.key_len {
                    // The short last pair merges through the whole key region.
                    let saved = (self.buf_pos, self.buf_len, self.has_int_buf);
                    self.buf_pos = self.key_pos;
                    self.buf_len = self.key_len;
                    self.has_int_buf = true;

                    combine(self, i, i + r, m);

                    (self.buf_pos, self.buf_len, self.has_int_buf) = saved;
                } else {
                    combine(self, i, i + r, m);
                }
            }

            r = two_r;
        }

        if m == b {
            return;
        }

        self.buf_len = 0;
        self.has_int_buf = false;
        self.insert_sort(m, b);

        if m == a || self.compare(m - 1, m) != Ordering::Greater {
            return;
        }

        let (a, b) = self.reduce_bounds(a, m, b);
        if !self.opti_smart_merge(Side::Left, a, m, b) {
            self.merge_in_place(Side::Left, a, m, b);
        }
    }
}
