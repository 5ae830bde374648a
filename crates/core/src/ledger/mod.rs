//! Income/expense transactions and monthly summaries.

pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use summary::{MonthlySummary, spend_by_envelope, summarize};
pub use types::{LedgerError, TransactionKind, TransactionStatus};
pub use validation::{validate_amount, validate_description};
