//! Row identifier newtype and its allocator.
//!
//! Ids are minted only by [`RowIdAllocator`], which never hands out the
//! same value twice. The raw constructor is not exported.

use std::fmt;

/// Opaque identifier of a review row, stable for the row's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Raw numeric value, for logging.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Monotonic source of [`RowId`]s.
#[derive(Debug, Default)]
pub struct RowIdAllocator {
    next: u64,
}

impl RowIdAllocator {
    /// Create an allocator starting at the first id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh id.
    pub fn allocate(&mut self) -> RowId {
        let id = RowId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn allocator_never_repeats() {
        let mut allocator = RowIdAllocator::new();
        let ids: HashSet<RowId> = (0..1000).map(|_| allocator.allocate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_increasing() {
        let mut allocator = RowIdAllocator::new();
        let first = allocator.allocate();
        let second = allocator.allocate();
        assert!(second > first);
    }

    #[test]
    fn display_prefixes_row() {
        let mut allocator = RowIdAllocator::new();
        allocator.allocate();
        let id = allocator.allocate();
        assert_eq!(id.to_string(), "row-1");
        assert_eq!(id.get(), 1);
    }
}
