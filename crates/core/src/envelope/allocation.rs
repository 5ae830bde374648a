//! Income allocation across envelopes.
//!
//! Monetary envelopes take their fixed amount; percentage envelopes take
//! their share of the allocatable income, rounded half-away-from-zero to
//! the centavo. The arithmetic runs in `Decimal` throughout.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use bolso_shared::types::Money;

use super::types::{Envelope, EnvelopeKind};

/// The planned amount for one envelope in an allocation round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// Envelope ID.
    pub envelope_id: Uuid,
    /// Envelope name.
    pub name: String,
    /// Envelope kind.
    pub kind: EnvelopeKind,
    /// Planned amount in centavos.
    pub planned: Money,
}

/// Allocates `income` across `envelopes`.
///
/// The result preserves the input order. Percentage envelopes of a
/// zero-or-negative income allocate zero.
#[must_use]
pub fn allocate(income: Money, envelopes: &[Envelope]) -> Vec<Allocation> {
    envelopes
        .iter()
        .map(|envelope| {
            let planned = match envelope.kind {
                EnvelopeKind::Monetary => Money::from_centavos(envelope.value),
                EnvelopeKind::Percentage => {
                    if income.is_negative() || income.is_zero() {
                        Money::ZERO
                    } else {
                        income.percent(Decimal::from(envelope.value))
                    }
                }
            };

            Allocation {
                envelope_id: envelope.id,
                name: envelope.name.clone(),
                kind: envelope.kind,
                planned,
            }
        })
        .collect()
}
