//! Money as integer minor units (centavos).
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are carried as an integer number of centavos end to end;
//! `rust_decimal::Decimal` is used only for percentage arithmetic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in centavos (BRL minor units).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero centavos.
    pub const ZERO: Self = Self(0);

    /// Creates a money value from an amount in centavos.
    #[must_use]
    pub const fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    /// Returns the amount in centavos.
    #[must_use]
    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(diff) => Some(Self(diff)),
            None => None,
        }
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parses user input into centavos.
    ///
    /// Every character that is not an ASCII digit is discarded and the
    /// remaining digits are read as centavos, so `"1.234,56"`, `"123456"`
    /// and `"R$ 1.234,56"` all parse to 123456. Empty or digit-free input
    /// parses to zero. Values beyond `i64::MAX` saturate.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut centavos: i64 = 0;
        for c in input.chars().filter(char::is_ascii_digit) {
            let digit = i64::from(c as u8 - b'0');
            centavos = centavos
                .saturating_mul(10)
                .saturating_add(digit);
        }
        Self(centavos)
    }

    /// Takes a percentage share of this amount, rounded half-away-from-zero
    /// to the centavo.
    ///
    /// Used for percentage-type envelope allocation; the arithmetic runs in
    /// `Decimal` so no float ever touches a currency value.
    #[must_use]
    pub fn percent(self, share: Decimal) -> Self {
        let exact = Decimal::from(self.0) * share / Decimal::ONE_HUNDRED;
        let rounded = exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self(rounded.to_i64().unwrap_or(i64::MAX))
    }

    /// Formats the amount in pt-BR style: `R$ 1.234,56`.
    ///
    /// Thousands are grouped with `.`, the decimal separator is `,` and a
    /// minus sign leads negative amounts.
    #[must_use]
    pub fn format_brl(self) -> String {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let reais = abs / 100;
        let cents = abs % 100;

        let digits = reais.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        let sign = if negative { "-" } else { "" };
        format!("{sign}R$ {grouped},{cents:02}")
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_brl())
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc.saturating_add(m))
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
