//! Envelope field validation.

use super::error::EnvelopeError;
use super::types::EnvelopeKind;

/// Maximum envelope name length (matches the column width).
pub const MAX_NAME_LEN: usize = 100;

/// Validates an envelope name.
///
/// # Errors
///
/// Returns `EnvelopeError::EmptyName` for empty or whitespace-only names,
/// `EnvelopeError::NameTooLong` beyond [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), EnvelopeError> {
    if name.trim().is_empty() {
        return Err(EnvelopeError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(EnvelopeError::NameTooLong(MAX_NAME_LEN));
    }
    Ok(())
}

/// Validates an envelope value against its kind.
///
/// Percentage values must lie in 0-100; monetary values (centavos) must
/// not be negative.
///
/// # Errors
///
/// Returns `EnvelopeError::InvalidPercentage` or
/// `EnvelopeError::NegativeAmount` accordingly.
pub fn validate_value(kind: EnvelopeKind, value: i64) -> Result<(), EnvelopeError> {
    match kind {
        EnvelopeKind::Percentage => {
            if !(0..=100).contains(&value) {
                return Err(EnvelopeError::InvalidPercentage(value));
            }
        }
        EnvelopeKind::Monetary => {
            if value < 0 {
                return Err(EnvelopeError::NegativeAmount(value));
            }
        }
    }
    Ok(())
}
