use std::cmp::Ordering;

use crate::context::SortContext;
use crate::SMALL_MERGE;

/// Which scratch a rotation may move elements through.
///
/// Both fall back to block swaps when the scratch is too small, and to single element shifts
/// when one side has length one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// Copies through the external buffer, or pure block swaps if there is none.
    External,
    /// Swaps through the internal buffer.
    Internal,
}

impl Rotation {
    /// Rotating through the internal buffer costs three swaps per element instead of two copies,
    /// so it only pays off when that buffer is a lot larger.
    pub(crate) fn select(int_len: usize, ext_len: usize) -> Self {
        if int_len > ext_len * 2 {
            Rotation::Internal
        } else {
            Rotation::External
        }
    }
}

impl<T, F> SortContext<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Swaps `[a, m)` with `[m, b)` using the currently selected rotation.
    pub(crate) fn rotate(&mut self, a: usize, m: usize, b: usize) {
        match self.rotation {
            Rotation::External => self.rotate_external(a, m, b),
            Rotation::Internal => self.rotate_internal(a, m, b),
        }
    }

    pub(crate) fn rotate_external(&mut self, a: usize, m: usize, b: usize) {
        let Some((a, m, b)) = self.shrink_rotation(a, m, b, self.ext_buf.len()) else {
            return;
        };

        let (left_len, right_len) = (m - a, b - m);
        if right_len < left_len {
            self.ext_buf[..right_len].copy_from_slice(&self.v[m..b]);
            self.v.copy_within(a..m, b - left_len);
            self.v[a..a + right_len].copy_from_slice(&self.ext_buf[..right_len]);
        } else {
            self.ext_buf[..left_len].copy_from_slice(&self.v[a..m]);
            self.v.copy_within(m..b, a);
            self.v[b - left_len..b].copy_from_slice(&self.ext_buf[..left_len]);
        }
    }

    pub(crate) fn rotate_internal(&mut self, a: usize, m: usize, b: usize) {
        let buf = self.buf_pos;
        let Some((a, m, b)) = self.shrink_rotation(a, m, b, self.buf_len) else {
            return;
        };

        let (left_len, right_len) = (m - a, b - m);
        if right_len < left_len {
            self.block_swap(m, buf, right_len);
            for i in (a + right_len..b).rev() {
                self.v.swap(i, i - right_len);
            }
            self.block_swap(buf, a, right_len);
        } else {
            self.block_swap(a, buf, left_len);
            for i in a..b - left_len {
                self.v.swap(i, i + left_len);
            }
            self.block_swap(buf, b - left_len, left_len);
        }
    }

    /// Block swaps the shorter side past the longer one until the shorter side fits `buf_len`.
    ///
    /// Returns the range that is still left to rotate through the buffer, `None` if the rotation
    /// is already complete.
    fn shrink_rotation(
        &mut self,
        mut a: usize,
        m: usize,
        mut b: usize,
        buf_len: usize,
    ) -> Option<(usize, usize, usize)> {
        let mut left_len = m - a;
        let mut right_len = b - m;

        let min = if left_len != right_len && left_len.min(right_len).min(buf_len) > SMALL_MERGE {
            buf_len
        } else {
            1
        };

        while (right_len > min && left_len > min)
            || (right_len < SMALL_MERGE
                && right_len > 1
                && left_len < SMALL_MERGE
                && left_len > 1)
        {
            if right_len < left_len {
                self.block_swap(a, m, right_len);
                a += right_len;
                left_len -= right_len;
            } else {
                b -= left_len;
                right_len -= left_len;
                self.block_swap(a, b, left_len);
            }
        }

        if right_len == 1 {
            self.insert_to_left(m, a);
        } else if left_len == 1 {
            self.insert_to_right(a, b - 1);
        }

        if min == 1 || right_len <= 1 || left_len <= 1 {
            return None;
        }

        Some((a, m, b))
    }
}
