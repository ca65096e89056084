//! Error types for the membership filters

use thiserror::Error;

/// Errors that can occur while building or operating a filter
///
/// `FilterFull` and `RelocationLimitExceeded` are expected outcomes of a
/// cuckoo filter reaching its capacity. The remaining variants indicate a
/// caller mistake.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Incompatible filters: {0}")]
    IncompatibleFilter(String),

    #[error("Filter is full: load factor {load_factor:.4} >= {max_load_factor}")]
    FilterFull {
        load_factor: f64,
        max_load_factor: f64,
    },

    #[error("Maximum number of relocations reached: {kicks}")]
    RelocationLimitExceeded { kicks: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilterError {
    /// Whether the error reports an exhausted filter rather than a caller mistake.
    ///
    /// Callers typically respond by rebuilding with a larger capacity or by
    /// dropping the item.
    pub fn is_capacity_exhausted(&self) -> bool {
        matches!(
            self,
            FilterError::FilterFull { .. } | FilterError::RelocationLimitExceeded { .. }
        )
    }
}
