//! Input and parameter validation shared by both filters

use crate::error::FilterError;

/// Reject items the filters cannot hash meaningfully
///
/// `&[u8]` cannot be absent, so only emptiness is checked.
pub fn validate_item(item: &[u8]) -> Result<(), FilterError> {
    if item.is_empty() {
        return Err(FilterError::InvalidInput(
            "input cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Capacity must allow at least one item
pub fn validate_capacity(capacity: usize) -> Result<(), FilterError> {
    validate_positive("capacity", capacity)
}

/// A count that must be at least one
pub fn validate_positive(name: &str, value: usize) -> Result<(), FilterError> {
    if value == 0 {
        return Err(FilterError::InvalidParameter(format!(
            "{} must be at least 1",
            name
        )));
    }
    Ok(())
}

/// A probability strictly between 0 and 1
///
/// NaN fails both comparisons and is rejected.
pub fn validate_rate(name: &str, rate: f64) -> Result<(), FilterError> {
    if !(rate > 0.0 && rate < 1.0) {
        return Err(FilterError::InvalidParameter(format!(
            "{} must be between 0 and 1 (exclusive), got {}",
            name, rate
        )));
    }
    Ok(())
}
