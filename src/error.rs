//! Error type for the checked table operations.

use thiserror::Error;

/// Errors reported by the `try_*` family of [`HashTable`](crate::HashTable)
/// operations.
///
/// Lookups of missing keys are not errors; they return `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The caller passed an absent key. Raised before any mutation.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl TableError {
    pub(crate) const fn absent_key() -> Self {
        TableError::InvalidArgument("key cannot be absent")
    }
}

#[cfg(test)]
mod tests {
    use super::TableError;

    #[test]
    fn absent_key_message() {
        let e = TableError::absent_key();
        assert_eq!(e.to_string(), "invalid argument: key cannot be absent");
    }
}
