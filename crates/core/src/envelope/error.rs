//! Envelope validation errors.

use thiserror::Error;

/// Errors raised by envelope field validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Envelope name is empty or whitespace.
    #[error("envelope name must not be empty")]
    EmptyName,

    /// Envelope name exceeds the storage limit.
    #[error("envelope name must be at most {0} characters")]
    NameTooLong(usize),

    /// Percentage value outside 0-100.
    #[error("percentage value must be between 0 and 100, got {0}")]
    InvalidPercentage(i64),

    /// Monetary value below zero.
    #[error("monetary value must not be negative, got {0}")]
    NegativeAmount(i64),
}
