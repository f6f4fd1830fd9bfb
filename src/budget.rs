use crate::SMALL_SORT;

/// How much scratch memory a sort may use, counted in elements.
///
/// The named tiers ask for the amount that suits a strategy best for the given input length.
/// Index and key tables are counted in the same unit as elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryBudget {
    /// A literal element count.
    Elements(usize),
    /// `n / 2`, merge sort.
    Uranium,
    /// `sqrt(n) + 2n / sqrt(n)`, block merge sort with external index and key tables.
    Hydrogen,
    /// `sqrt(n) + n / sqrt(n)`, block merge sort with an external key table.
    Helium3A,
    /// `sqrt(n)`, keys harvested from the input, external buffer.
    Helium3B,
    /// Nothing, keys and buffer harvested from the input.
    Helium3C,
}

impl From<usize> for MemoryBudget {
    fn from(elements: usize) -> Self {
        MemoryBudget::Elements(elements)
    }
}

/// Strategy and scratch sizes for one call, a pure function of the input length and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Plan {
    InPlace,
    Uranium {
        buf_len: usize,
    },
    Hydrogen {
        block_len: usize,
        key_count: usize,
        buf_len: usize,
    },
    Helium3A {
        block_len: usize,
        key_count: usize,
        buf_len: usize,
    },
    /// Becomes 4A if fewer than `key_count` distinct values can be harvested.
    Helium3B {
        block_len: usize,
        key_count: usize,
        buf_len: usize,
    },
    /// Harvests `block_len + key_count` values, becomes 4B if fewer exist.
    Helium3C {
        block_len: usize,
        key_count: usize,
        buf_len: usize,
    },
}

/// Smallest power of two whose square is at least `n`.
pub(crate) fn ideal_block_len(n: usize) -> usize {
    let mut block_len = 1;
    while block_len * block_len < n {
        block_len <<= 1;
    }
    block_len
}

impl Plan {
    pub(crate) fn new(n: usize, budget: MemoryBudget) -> Self {
        if n <= SMALL_SORT {
            return Plan::InPlace;
        }

        let half = n / 2;
        let sqrt_n = ideal_block_len(n);
        let key_count = n / sqrt_n;

        let mem = match budget {
            MemoryBudget::Elements(mem) => mem,
            MemoryBudget::Uranium => half,
            MemoryBudget::Hydrogen => sqrt_n + 2 * key_count,
            MemoryBudget::Helium3A => sqrt_n + key_count,
            MemoryBudget::Helium3B => sqrt_n,
            MemoryBudget::Helium3C => 0,
        };

        if mem >= half {
            return Plan::Uranium { buf_len: half };
        }

        let ideal = sqrt_n + 2 * key_count;
        if mem >= ideal {
            let mut block_len = sqrt_n;
            while mem != ideal && block_len * 2 + 2 * (n / (block_len * 2)) <= mem {
                block_len *= 2;
            }

            let key_count = n / block_len;
            return Plan::Hydrogen {
                block_len,
                key_count,
                buf_len: mem - 2 * key_count,
            };
        }

        let ideal = sqrt_n + key_count;
        if mem >= ideal {
            let mut block_len = sqrt_n;
            while mem != ideal && block_len * 2 + n / (block_len * 2) <= mem {
                block_len *= 2;
            }

            let key_count = n / block_len;
            return Plan::Helium3A {
                block_len,
                key_count,
                buf_len: mem - key_count,
            };
        }

        if mem >= sqrt_n {
            let mut block_len = sqrt_n;
            while block_len * 2 <= mem {
                block_len *= 2;
            }

            return Plan::Helium3B {
                block_len,
                key_count: n / block_len,
                buf_len: mem,
            };
        }

        Plan::Helium3C {
            block_len: sqrt_n,
            key_count,
            buf_len: mem,
        }
    }
}
