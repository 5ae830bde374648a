use proptest::prelude::*;
use rstest::rstest;
use uuid::Uuid;

use bolso_shared::types::Money;

use super::allocation::allocate;
use super::error::EnvelopeError;
use super::types::{Envelope, EnvelopeKind};
use super::validation::{MAX_NAME_LEN, validate_name, validate_value};

fn envelope(name: &str, value: i64, kind: EnvelopeKind) -> Envelope {
    Envelope {
        id: Uuid::new_v4(),
        user_id: Some(Uuid::new_v4()),
        name: name.to_string(),
        value,
        kind,
        is_global: false,
        is_deletable: true,
    }
}

#[test]
fn test_validate_name_accepts_regular_names() {
    assert!(validate_name("Viagem").is_ok());
    assert!(validate_name("Remuneração").is_ok());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn test_validate_name_rejects_blank(#[case] name: &str) {
    assert_eq!(validate_name(name), Err(EnvelopeError::EmptyName));
}

#[test]
fn test_validate_name_rejects_too_long() {
    let name = "a".repeat(MAX_NAME_LEN + 1);
    assert_eq!(
        validate_name(&name),
        Err(EnvelopeError::NameTooLong(MAX_NAME_LEN))
    );
}

#[rstest]
#[case(0)]
#[case(50)]
#[case(100)]
fn test_validate_percentage_in_range(#[case] value: i64) {
    assert!(validate_value(EnvelopeKind::Percentage, value).is_ok());
}

#[rstest]
#[case(-1)]
#[case(101)]
#[case(10_000)]
fn test_validate_percentage_out_of_range(#[case] value: i64) {
    assert_eq!(
        validate_value(EnvelopeKind::Percentage, value),
        Err(EnvelopeError::InvalidPercentage(value))
    );
}

#[test]
fn test_validate_monetary_value() {
    assert!(validate_value(EnvelopeKind::Monetary, 0).is_ok());
    assert!(validate_value(EnvelopeKind::Monetary, 50_000).is_ok());
    assert_eq!(
        validate_value(EnvelopeKind::Monetary, -1),
        Err(EnvelopeError::NegativeAmount(-1))
    );
}

#[test]
fn test_allocate_monetary_takes_fixed_amount() {
    let envelopes = vec![envelope("Viagem", 50_000, EnvelopeKind::Monetary)];
    let allocations = allocate(Money::from_centavos(100_000), &envelopes);

    assert_eq!(allocations.len(), 1);
    assert_eq!(allocations[0].planned, Money::from_centavos(50_000));
}

#[test]
fn test_allocate_percentage_takes_share_of_income() {
    let envelopes = vec![
        envelope("Moradia", 30, EnvelopeKind::Percentage),
        envelope("Lazer", 10, EnvelopeKind::Percentage),
    ];
    let allocations = allocate(Money::from_centavos(500_000), &envelopes);

    assert_eq!(allocations[0].planned, Money::from_centavos(150_000));
    assert_eq!(allocations[1].planned, Money::from_centavos(50_000));
}

#[test]
fn test_allocate_percentage_of_zero_income() {
    let envelopes = vec![envelope("Moradia", 30, EnvelopeKind::Percentage)];
    let allocations = allocate(Money::ZERO, &envelopes);

    assert_eq!(allocations[0].planned, Money::ZERO);
}

#[test]
fn test_allocate_preserves_input_order() {
    let envelopes = vec![
        envelope("B", 10, EnvelopeKind::Percentage),
        envelope("A", 20_000, EnvelopeKind::Monetary),
    ];
    let allocations = allocate(Money::from_centavos(100_000), &envelopes);

    assert_eq!(allocations[0].name, "B");
    assert_eq!(allocations[1].name, "A");
}

#[test]
fn test_allocate_rounds_to_centavo() {
    // 33% of R$ 0,50 = 16,5 centavos, rounds away from zero to 17
    let envelopes = vec![envelope("Terço", 33, EnvelopeKind::Percentage)];
    let allocations = allocate(Money::from_centavos(50), &envelopes);

    assert_eq!(allocations[0].planned, Money::from_centavos(17));
}

proptest! {
    /// Percentage envelopes whose shares sum to at most 100 never allocate
    /// more than the income, rounding included.
    #[test]
    fn prop_percentage_allocations_bounded(
        income in 0i64..1_000_000_000,
        shares in proptest::collection::vec(0i64..=25, 0..4),
    ) {
        let envelopes: Vec<Envelope> = shares
            .iter()
            .map(|&s| envelope("e", s, EnvelopeKind::Percentage))
            .collect();

        let income = Money::from_centavos(income);
        let total: Money = allocate(income, &envelopes)
            .into_iter()
            .map(|a| a.planned)
            .sum();

        // Each share rounds by at most half a centavo
        let slack = i64::try_from(envelopes.len()).unwrap();
        prop_assert!(total.centavos() <= income.centavos() + slack);
    }

    /// Monetary allocations ignore income entirely.
    #[test]
    fn prop_monetary_independent_of_income(
        income in 0i64..1_000_000_000,
        value in 0i64..1_000_000_000,
    ) {
        let envelopes = vec![envelope("fixo", value, EnvelopeKind::Monetary)];
        let allocations = allocate(Money::from_centavos(income), &envelopes);

        prop_assert_eq!(allocations[0].planned.centavos(), value);
    }
}
