//! Size checks shared by feature rebinding and statistics packaging.

use crate::error::{DomainError, Result};

/// Require `items` to hold exactly `expected` elements.
pub fn check_size<T>(context: &str, expected: usize, items: &[T]) -> Result<()> {
    if items.len() != expected {
        return Err(DomainError::size_mismatch(context, expected, items.len()));
    }
    Ok(())
}

/// Require two parallel sequences to have the same length.
///
/// The left sequence's length is reported as the expected size.
pub fn check_paired<L, R>(context: &str, left: &[L], right: &[R]) -> Result<()> {
    if left.len() != right.len() {
        return Err(DomainError::size_mismatch(context, left.len(), right.len()));
    }
    Ok(())
}
