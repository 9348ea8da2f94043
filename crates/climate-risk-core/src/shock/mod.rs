//! Derivation of scalar stress-test inputs from aggregated assessment
//! results, plus the static scenario context table they are presented
//! against.

pub mod physical;
pub mod scenario;
pub mod transition;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which stress-test input a derivation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShockKind {
    /// Physical damage index in [0, 0.5]
    PhysicalDamageIndex,
    /// Implied carbon price in currency units per tCO2e, >= 0
    CarbonPrice,
}

/// A scalar handed to the downstream scenario module, with provenance.
///
/// Derived on demand and never recomputed automatically when the
/// underlying results change: re-deriving is an explicit operator
/// action, so a stale stress-test input is visible as such rather than
/// silently refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedShockParameter {
    pub kind: ShockKind,
    pub value: Decimal,
    /// The assessment results (or score tables) the value was computed from
    pub provenance: Vec<String>,
    pub derived_at: DateTime<Utc>,
}
