use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::assessment::matrix::AssessmentResult;
use crate::error::ClimateRiskError;
use crate::shock::{DerivedShockParameter, ShockKind};
use crate::types::{with_metadata, ComputationOutput};
use crate::ClimateRiskResult;

/// Highest risk score a scored asset can carry.
const MAX_RISK_SCORE: Decimal = dec!(25);

/// Scale factor mapping a normalised average score onto the index range.
const INDEX_CEILING: Decimal = dec!(0.5);

/// Derive the physical damage index from one or more assessment results.
///
/// The index is the exposure-weighted average risk score across every
/// scored asset in the given results, normalised to [0, 0.5] and rounded
/// to 4 decimal places. Zero total exposure (including an empty result
/// list) fails with `EmptyPortfolio`: zero is a legitimate index value,
/// so it must never double as a "no data" marker.
pub fn derive_physical_damage_index(
    results: &[AssessmentResult],
) -> ClimateRiskResult<ComputationOutput<DerivedShockParameter>> {
    let start = Instant::now();

    let mut weighted_sum = Decimal::ZERO;
    let mut total_exposure = Decimal::ZERO;
    for result in results {
        for scored in &result.scored_assets {
            weighted_sum += Decimal::from(scored.risk_score) * scored.asset.exposure;
            total_exposure += scored.asset.exposure;
        }
    }

    if total_exposure.is_zero() {
        return Err(ClimateRiskError::EmptyPortfolio(
            "no exposure to weight against; cannot derive a physical damage index".into(),
        ));
    }

    let avg_score = weighted_sum / total_exposure;
    let index = (avg_score / MAX_RISK_SCORE * INDEX_CEILING)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);

    let provenance = results
        .iter()
        .map(|r| format!("{}/{} @ {}", r.risk_id, r.method.key(), r.run_at.to_rfc3339()))
        .collect();

    let parameter = DerivedShockParameter {
        kind: ShockKind::PhysicalDamageIndex,
        value: index,
        provenance,
        derived_at: Utc::now(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "formula": "(sum(risk_score * exposure) / sum(exposure)) / 25 * 0.5",
        "range": "[0, 0.5]",
        "rounding": "4 dp, half away from zero",
        "staleness": "not auto-recomputed; re-derive explicitly after new runs",
    });

    Ok(with_metadata(
        "Physical Damage Index (exposure-weighted average risk score)",
        &assumptions,
        Vec::new(),
        elapsed,
        parameter,
    ))
}
