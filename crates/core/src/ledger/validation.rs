//! Transaction field validation.

use bolso_shared::types::Money;

use super::types::LedgerError;

/// Validates a transaction description.
///
/// # Errors
///
/// Returns `LedgerError::EmptyDescription` for blank input.
pub fn validate_description(description: &str) -> Result<(), LedgerError> {
    if description.trim().is_empty() {
        return Err(LedgerError::EmptyDescription);
    }
    Ok(())
}

/// Validates a transaction amount.
///
/// Amounts are always positive; direction is carried by the transaction
/// kind, not the sign.
///
/// # Errors
///
/// Returns `LedgerError::NonPositiveAmount` for zero or negative amounts.
pub fn validate_amount(amount: Money) -> Result<(), LedgerError> {
    if amount.centavos() <= 0 {
        return Err(LedgerError::NonPositiveAmount(amount.centavos()));
    }
    Ok(())
}
