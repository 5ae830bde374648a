use rstest::rstest;
use uuid::Uuid;

use bolso_shared::types::Money;

use super::summary::{spend_by_envelope, summarize};
use super::types::{LedgerError, TransactionKind, TransactionStatus};
use super::validation::{validate_amount, validate_description};

#[test]
fn test_validate_description() {
    assert!(validate_description("Mercado").is_ok());
    assert_eq!(
        validate_description("   "),
        Err(LedgerError::EmptyDescription)
    );
}

#[rstest]
#[case(0)]
#[case(-100)]
fn test_validate_amount_rejects_non_positive(#[case] centavos: i64) {
    assert_eq!(
        validate_amount(Money::from_centavos(centavos)),
        Err(LedgerError::NonPositiveAmount(centavos))
    );
}

#[test]
fn test_validate_amount_accepts_positive() {
    assert!(validate_amount(Money::from_centavos(1)).is_ok());
}

#[test]
fn test_kind_parse_roundtrip() {
    assert_eq!(
        "income".parse::<TransactionKind>().unwrap(),
        TransactionKind::Income
    );
    assert_eq!(TransactionKind::Expense.to_string(), "expense");
    assert!("transfer".parse::<TransactionKind>().is_err());
}

#[test]
fn test_status_parse_roundtrip() {
    assert_eq!(
        "cleared".parse::<TransactionStatus>().unwrap(),
        TransactionStatus::Cleared
    );
    assert_eq!(TransactionStatus::Pending.to_string(), "pending");
}

#[test]
fn test_summarize_empty() {
    let summary = summarize(std::iter::empty());
    assert_eq!(summary.income, Money::ZERO);
    assert_eq!(summary.expenses, Money::ZERO);
    assert_eq!(summary.balance, Money::ZERO);
}

#[test]
fn test_summarize_mixed_month() {
    let summary = summarize([
        (TransactionKind::Income, Money::from_centavos(500_000)),
        (TransactionKind::Expense, Money::from_centavos(120_000)),
        (TransactionKind::Expense, Money::from_centavos(30_000)),
    ]);

    assert_eq!(summary.income, Money::from_centavos(500_000));
    assert_eq!(summary.expenses, Money::from_centavos(150_000));
    assert_eq!(summary.balance, Money::from_centavos(350_000));
}

#[test]
fn test_summarize_negative_balance() {
    let summary = summarize([
        (TransactionKind::Income, Money::from_centavos(100)),
        (TransactionKind::Expense, Money::from_centavos(300)),
    ]);

    assert_eq!(summary.balance, Money::from_centavos(-200));
}

#[test]
fn test_spend_by_envelope_only_counts_expenses() {
    let groceries = Uuid::new_v4();
    let salary = Uuid::new_v4();

    let spent = spend_by_envelope([
        (groceries, TransactionKind::Expense, Money::from_centavos(80_000)),
        (groceries, TransactionKind::Expense, Money::from_centavos(20_000)),
        (salary, TransactionKind::Income, Money::from_centavos(500_000)),
    ]);

    assert_eq!(spent.get(&groceries), Some(&Money::from_centavos(100_000)));
    assert!(!spent.contains_key(&salary));
}
