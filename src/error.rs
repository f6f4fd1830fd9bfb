use std::collections::TryReserveError;

use thiserror::Error;

/// Why a sort call returned without sorting.
#[derive(Debug, Error)]
pub enum SortError {
    /// `start > end` or `end > len`.
    #[error("invalid range {start}..{end} for slice of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A scratch buffer could not be reserved, the slice is unchanged.
    #[error("failed to reserve scratch memory for {elements} elements")]
    Alloc {
        elements: usize,
        #[source]
        source: TryReserveError,
    },
}
