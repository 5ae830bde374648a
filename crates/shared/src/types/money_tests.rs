use super::*;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal_macros::dec;

#[test]
fn test_parse_digit_string() {
    assert_eq!(Money::parse("123456").centavos(), 123_456);
    assert_eq!(Money::parse("050").centavos(), 50);
    assert_eq!(Money::parse("0").centavos(), 0);
}

#[test]
fn test_parse_formatted_input() {
    assert_eq!(Money::parse("1.234,56").centavos(), 123_456);
    assert_eq!(Money::parse("R$ 1.234,56").centavos(), 123_456);
    assert_eq!(Money::parse("12,34").centavos(), 1_234);
}

#[test]
fn test_parse_empty_and_non_digit() {
    assert_eq!(Money::parse("").centavos(), 0);
    assert_eq!(Money::parse("abc").centavos(), 0);
    assert_eq!(Money::parse("R$ ,").centavos(), 0);
}

#[test]
fn test_parse_saturates_on_overflow() {
    let huge = "9".repeat(40);
    assert_eq!(Money::parse(&huge).centavos(), i64::MAX);
}

#[rstest]
#[case(0, "R$ 0,00")]
#[case(5, "R$ 0,05")]
#[case(100, "R$ 1,00")]
#[case(123_456, "R$ 1.234,56")]
#[case(1_000_000_00, "R$ 1.000.000,00")]
#[case(-123_456, "-R$ 1.234,56")]
fn test_format_brl(#[case] centavos: i64, #[case] expected: &str) {
    assert_eq!(Money::from_centavos(centavos).format_brl(), expected);
}

#[test]
fn test_display_matches_format_brl() {
    let m = Money::from_centavos(50_000);
    assert_eq!(m.to_string(), "R$ 500,00");
}

#[test]
fn test_percent_rounds_half_away_from_zero() {
    // 10% of R$ 0,05 is 0,5 centavo, rounds up to 1
    assert_eq!(Money::from_centavos(5).percent(dec!(10)).centavos(), 1);
    assert_eq!(
        Money::from_centavos(100_000).percent(dec!(50)).centavos(),
        50_000
    );
    assert_eq!(
        Money::from_centavos(99_999).percent(dec!(33)).centavos(),
        33_000
    );
}

#[test]
fn test_percent_zero_and_full() {
    let m = Money::from_centavos(123_456);
    assert_eq!(m.percent(dec!(0)), Money::ZERO);
    assert_eq!(m.percent(dec!(100)), m);
}

#[test]
fn test_checked_arithmetic() {
    let a = Money::from_centavos(i64::MAX);
    assert!(a.checked_add(Money::from_centavos(1)).is_none());
    assert_eq!(
        Money::from_centavos(10).checked_sub(Money::from_centavos(4)),
        Some(Money::from_centavos(6))
    );
}

#[test]
fn test_sum() {
    let total: Money = [10, 20, 30]
        .into_iter()
        .map(Money::from_centavos)
        .sum();
    assert_eq!(total.centavos(), 60);
}

proptest! {
    /// Round-trip: parsing a digit-only string yields exactly those digits
    /// as centavos, and formatting then re-parsing is the identity.
    #[test]
    fn prop_parse_digit_roundtrip(n in 0i64..1_000_000_000_000) {
        let s = n.to_string();
        prop_assert_eq!(Money::parse(&s).centavos(), n);
    }

    #[test]
    fn prop_format_then_parse_roundtrip(n in 0i64..1_000_000_000_000) {
        let m = Money::from_centavos(n);
        prop_assert_eq!(Money::parse(&m.format_brl()), m);
    }

    /// A percentage share in 0..=100 of a non-negative amount never exceeds
    /// the amount itself.
    #[test]
    fn prop_percent_bounded(n in 0i64..1_000_000_000, pct in 0u32..=100) {
        let m = Money::from_centavos(n);
        let share = m.percent(Decimal::from(pct));
        prop_assert!(share.centavos() >= 0);
        prop_assert!(share <= m);
    }
}
