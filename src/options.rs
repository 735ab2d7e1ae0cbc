//! Constructor configuration for `HashTable`.

/// Bucket count used when no capacity is requested.
pub const DEFAULT_CAPACITY: usize = 10;

/// Options recognized by [`HashTable::with_options`](crate::HashTable::with_options).
///
/// Only the starting bucket count is configurable; the growth factor and the
/// load-factor threshold are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Starting bucket count. Zero is treated as one.
    pub initial_capacity: usize,
}

impl TableOptions {
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }

    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Bucket count a table built from these options starts with.
    pub(crate) fn bucket_count(&self) -> usize {
        if self.initial_capacity == 0 {
            log::warn!("initial capacity of 0 requested; using 1 bucket");
            return 1;
        }
        self.initial_capacity
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::new()
    }
}
