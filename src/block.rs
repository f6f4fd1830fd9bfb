use std::cmp::Ordering::{self, Greater, Less};

use crate::context::SortContext;
use crate::merge::Side;

/// Where the block tags of one block merge live, and how to tell left blocks from right ones.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Tags<T> {
    /// Origin indices in `SortContext::keys`, indices below `left` are left blocks.
    External { left: usize },
    /// Distinct, initially sorted values at `pos` in the array. Values below `mid` tag left
    /// blocks, `None` means every block is a left block.
    InArray { pos: usize, mid: Option<T> },
}

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    #[inline]
    fn block_tail(&self, a: usize, block: usize) -> usize {
        a + (block + 1) * self.block_len - 1
    }

    fn tag_less(&mut self, tags: &Tags<T>, i: usize, j: usize) -> bool {
        match *tags {
            Tags::External { .. } => self.keys[i] < self.keys[j],
            Tags::InArray { pos, .. } => self.compare(pos + i, pos + j) == Less,
        }
    }

    fn tag_swap(&mut self, tags: &Tags<T>, i: usize, j: usize) {
        match *tags {
            Tags::External { .. } => self.keys.swap(i, j),
            Tags::InArray { pos, .. } => self.v.swap(pos + i, pos + j),
        }
    }

    fn tag_is_left(&mut self, tags: &Tags<T>, i: usize) -> bool {
        match *tags {
            Tags::External { left } => self.keys[i] < left,
            Tags::InArray { pos, mid: Some(mid) } => self.compare_to(pos + i, &mid) == Less,
            Tags::InArray { mid: None, .. } => true,
        }
    }

    /// Merges the block tails of both sides into `indices`, the order the blocks must end up in.
    fn block_indices(&mut self, a: usize, left_blocks: usize, right_blocks: usize) {
        let mut l = 0;
        let mut r = left_blocks;
        let end = left_blocks + right_blocks;
        let mut o = 0;

        while l < left_blocks && r < end {
            let (tail_l, tail_r) = (self.block_tail(a, l), self.block_tail(a, r));

            if self.compare(tail_l, tail_r) != Greater {
                self.indices[o] = l;
                l += 1;
            } else {
                self.indices[o] = r;
                r += 1;
            }
            o += 1;
        }

        for block in (l..left_blocks).chain(r..end) {
            self.indices[o] = block;
            o += 1;
        }
    }

    /// Applies the permutation in `indices` to the blocks at `a` by following its cycles, moving
    /// each block once and parking one block per cycle in the external buffer.
    ///
    /// Leaves `indices` as the identity.
    fn block_cycle(&mut self, a: usize, block_qty: usize) {
        let block_len = self.block_len;
        let start = |block: usize| a + block * block_len;

        for i in 0..block_qty {
            if self.indices[i] == i {
                continue;
            }

            self.ext_buf[..block_len].copy_from_slice(&self.v[start(i)..start(i) + block_len]);

            let mut j = i;
            let mut next = self.indices[i];
            loop {
                self.v
                    .copy_within(start(next)..start(next) + block_len, start(j));
                self.indices[j] = j;

                j = next;
                next = self.indices[next];
                if next == i {
                    break;
                }
            }

            self.v[start(j)..start(j) + block_len].copy_from_slice(&self.ext_buf[..block_len]);
            self.indices[j] = j;
        }
    }

    /// Selection sort of the blocks at `a` by their tails, carrying the tags along.
    ///
    /// Left blocks that get displaced keep their relative order through their tags, so only the
    /// displaced ones have to be scanned for the next left block.
    fn block_select(&mut self, a: usize, left_blocks: usize, right_blocks: usize, tags: &Tags<T>) {
        let block_len = self.block_len;
        let start = |block: usize| a + block * block_len;

        let mid = left_blocks;
        let end = left_blocks + right_blocks;
        let mut next_left = 0;
        let mut next_right = mid;
        let mut k = 0;

        while k < next_right && next_right < end {
            let (tail_l, tail_r) = (
                self.block_tail(a, next_left),
                self.block_tail(a, next_right),
            );

            if self.compare(tail_l, tail_r) != Greater {
                if next_left > k {
                    self.block_swap(start(k), start(next_left), block_len);
                }
                self.tag_swap(tags, k, next_left);
                k += 1;

                next_left = k;
                for i in (k + 1).max(mid)..next_right {
                    if self.tag_less(tags, i, next_left) {
                        next_left = i;
                    }
                }
            } else {
                self.block_swap(start(k), start(next_right), block_len);
                self.tag_swap(tags, k, next_right);
                next_right += 1;

                if next_left == k {
                    next_left = next_right - 1;
                }
                k += 1;
            }
        }

        while k + 1 < next_right {
            if next_left > k {
                self.block_swap(start(k), start(next_left), block_len);
            }
            self.tag_swap(tags, k, next_left);
            k += 1;

            next_left = k;
            for i in k + 1..next_right {
                if self.tag_less(tags, i, next_left) {
                    next_left = i;
                }
            }
        }
    }

    /// Walks the ordered blocks and merges across every point where the block origin flips.
    fn merge_blocks(&mut self, a: usize, block_qty: usize, frag_len: usize, tags: &Tags<T>) {
        let block_len = self.block_len;
        let mut f = a;
        let mut left = self.tag_is_left(tags, 0);

        for i in 1..block_qty {
            if left == self.tag_is_left(tags, i) {
                continue;
            }

            let next = a + i * block_len;
            let side = if left { Side::Left } else { Side::Right };
            let boundary = self.v[next - 1];
            let next_end = self.search(side, next, next + block_len, &boundary);

            self.smart_merge(side, f, next, next_end);

            f = next_end;
            left = !left;
        }

        if left && frag_len != 0 {
            let frag = a + block_qty * block_len;
            self.smart_merge(Side::Left, f, frag, frag + frag_len);
        }
    }

    /// Block merge with external index and key tables, blocks are moved by cycle following.
    pub(crate) fn hydrogen_combine(&mut self, a: usize, m: usize, b: usize) {
        if self.check_bounds(a, m, b) || self.opti_merge(a, m, b) {
            return;
        }

        let block_len = self.block_len;
        let left_blocks = (m - a) / block_len;
        let right_blocks = (b - m) / block_len;
        let block_qty = left_blocks + right_blocks;
        let frag_len = (b - a) - block_qty * block_len;

        self.block_indices(a, left_blocks, right_blocks);
        self.keys[..block_qty].copy_from_slice(&self.indices[..block_qty]);
        self.block_cycle(a, block_qty);

        self.merge_blocks(
            a,
            block_qty,
            frag_len,
            &Tags::External { left: left_blocks },
        );
    }

    /// Block merge with block selection, tagged through the key table or the array keys.
    pub(crate) fn helium_combine(&mut self, a: usize, m: usize, b: usize, ext_tags: bool) {
        if self.check_bounds(a, m, b) || self.opti_merge(a, m, b) {
            return;
        }

        let block_len = self.block_len;
        let left_blocks = (m - a) / block_len;
        let right_blocks = (b - m) / block_len;
        let block_qty = left_blocks + right_blocks;
        let frag_len = (b - a) - block_qty * block_len;
        debug_assert_eq!((m - a) % block_len, 0);

        let tags = if ext_tags {
            for (i, key) in self.keys[..block_qty].iter_mut().enumerate() {
                *key = i;
            }

            Tags::External { left: left_blocks }
        } else {
            let pos = self.key_pos;
            debug_assert!(block_qty <= self.key_len);
            self.insert_sort(pos, pos + block_qty);

            let mid = (right_blocks > 0).then(|| self.v[pos + left_blocks]);
            Tags::InArray { pos, mid }
        };

        self.block_select(a, left_blocks, right_blocks, &tags);
        self.merge_blocks(a, block_qty, frag_len, &tags);
    }
}
