//! Aggregation of transactions into dashboard summaries.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use bolso_shared::types::Money;

use super::types::TransactionKind;

/// Income, expenses, and balance over one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct MonthlySummary {
    /// Total income in centavos.
    pub income: Money,
    /// Total expenses in centavos.
    pub expenses: Money,
    /// Income minus expenses.
    pub balance: Money,
}

/// Sums transactions into a [`MonthlySummary`].
#[must_use]
pub fn summarize(transactions: impl IntoIterator<Item = (TransactionKind, Money)>) -> MonthlySummary {
    let mut income = Money::ZERO;
    let mut expenses = Money::ZERO;

    for (kind, amount) in transactions {
        match kind {
            TransactionKind::Income => income = income.saturating_add(amount),
            TransactionKind::Expense => expenses = expenses.saturating_add(amount),
        }
    }

    MonthlySummary {
        income,
        expenses,
        balance: income.checked_sub(expenses).unwrap_or(Money::ZERO),
    }
}

/// Sums expense amounts per envelope.
///
/// Income entries do not count against any envelope.
#[must_use]
pub fn spend_by_envelope(
    transactions: impl IntoIterator<Item = (Uuid, TransactionKind, Money)>,
) -> HashMap<Uuid, Money> {
    let mut spent: HashMap<Uuid, Money> = HashMap::new();

    for (envelope_id, kind, amount) in transactions {
        if kind == TransactionKind::Expense {
            let entry = spent.entry(envelope_id).or_insert(Money::ZERO);
            *entry = entry.saturating_add(amount);
        }
    }

    spent
}
