//! Database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Interpretation of an envelope's `value` column.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "envelope_kind")]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeKind {
    /// Share (0-100) of allocatable income.
    #[sea_orm(string_value = "percentage")]
    Percentage,
    /// Absolute amount in centavos.
    #[sea_orm(string_value = "monetary")]
    Monetary,
}

/// Direction of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Settlement status of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Recorded but not yet settled.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "cleared")]
    Cleared,
}

impl From<bolso_core::envelope::EnvelopeKind> for EnvelopeKind {
    fn from(kind: bolso_core::envelope::EnvelopeKind) -> Self {
        match kind {
            bolso_core::envelope::EnvelopeKind::Percentage => Self::Percentage,
            bolso_core::envelope::EnvelopeKind::Monetary => Self::Monetary,
        }
    }
}

impl From<EnvelopeKind> for bolso_core::envelope::EnvelopeKind {
    fn from(kind: EnvelopeKind) -> Self {
        match kind {
            EnvelopeKind::Percentage => Self::Percentage,
            EnvelopeKind::Monetary => Self::Monetary,
        }
    }
}

impl From<bolso_core::ledger::TransactionKind> for TransactionKind {
    fn from(kind: bolso_core::ledger::TransactionKind) -> Self {
        match kind {
            bolso_core::ledger::TransactionKind::Income => Self::Income,
            bolso_core::ledger::TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionKind> for bolso_core::ledger::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<bolso_core::ledger::TransactionStatus> for TransactionStatus {
    fn from(status: bolso_core::ledger::TransactionStatus) -> Self {
        match status {
            bolso_core::ledger::TransactionStatus::Pending => Self::Pending,
            bolso_core::ledger::TransactionStatus::Cleared => Self::Cleared,
        }
    }
}

impl From<TransactionStatus> for bolso_core::ledger::TransactionStatus {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Cleared => Self::Cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_kind_roundtrip() {
        for kind in [
            bolso_core::envelope::EnvelopeKind::Percentage,
            bolso_core::envelope::EnvelopeKind::Monetary,
        ] {
            let db_kind = EnvelopeKind::from(kind);
            assert_eq!(bolso_core::envelope::EnvelopeKind::from(db_kind), kind);
        }
    }

    #[test]
    fn test_transaction_kind_roundtrip() {
        for kind in [
            bolso_core::ledger::TransactionKind::Income,
            bolso_core::ledger::TransactionKind::Expense,
        ] {
            let db_kind = TransactionKind::from(kind);
            assert_eq!(bolso_core::ledger::TransactionKind::from(db_kind), kind);
        }
    }

    #[test]
    fn test_transaction_status_roundtrip() {
        for status in [
            bolso_core::ledger::TransactionStatus::Pending,
            bolso_core::ledger::TransactionStatus::Cleared,
        ] {
            let db_status = TransactionStatus::from(status);
            assert_eq!(
                bolso_core::ledger::TransactionStatus::from(db_status),
                status
            );
        }
    }
}
