//! Envelope data types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bolso_shared::types::Money;

/// Name of the system default global envelope, lazily bootstrapped on
/// first use and never deletable.
pub const DEFAULT_ENVELOPE_NAME: &str = "Remuneração";

/// How an envelope's `value` field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeKind {
    /// `value` is a share (0-100) of allocatable income.
    Percentage,
    /// `value` is an absolute amount in centavos.
    Monetary,
}

impl std::fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Monetary => write!(f, "monetary"),
        }
    }
}

impl std::str::FromStr for EnvelopeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" => Ok(Self::Percentage),
            "monetary" => Ok(Self::Monetary),
            _ => Err(format!("Unknown envelope kind: {s}")),
        }
    }
}

/// A budget envelope.
///
/// Global envelopes (`is_global = true`) have no owner and are visible to
/// every identity; personal envelopes belong to exactly one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Envelope ID.
    pub id: Uuid,
    /// Owner, absent for global envelopes.
    pub user_id: Option<Uuid>,
    /// Envelope name, unique per owner.
    pub name: String,
    /// Percentage (0-100) or amount in centavos, per `kind`.
    pub value: i64,
    /// Interpretation of `value`.
    pub kind: EnvelopeKind,
    /// Whether the envelope is visible to all identities.
    pub is_global: bool,
    /// Whether the envelope may ever be deleted.
    pub is_deletable: bool,
}

impl Envelope {
    /// The fixed amount of a monetary envelope, if it is one.
    #[must_use]
    pub const fn monetary_value(&self) -> Option<Money> {
        match self.kind {
            EnvelopeKind::Monetary => Some(Money::from_centavos(self.value)),
            EnvelopeKind::Percentage => None,
        }
    }
}
