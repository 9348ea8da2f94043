use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::assessment::grouping::DEFAULT_SECTOR;
use crate::error::ClimateRiskError;
use crate::shock::{DerivedShockParameter, ShockKind};
use crate::types::{with_metadata, Asset, ComputationOutput};
use crate::ClimateRiskResult;

/// Currency units of carbon price per point of average risk score above
/// the floor of the scale.
const PRICE_PER_SCORE_POINT: Decimal = dec!(10);

/// Average risk scores per sector, as produced by a transition-risk
/// assessment (fractional scores are expected after averaging).
pub type SectorScores = BTreeMap<String, Decimal>;

/// Derive an implied carbon price from sector-level average risk scores
/// and the portfolio they apply to.
///
/// Each asset whose sector appears in the score table contributes
/// `score × exposure` to an exposure-weighted average; assets without a
/// sector match on the "General" default, consistent with grouping. The
/// price is `max(0, (avg − 1) × 10)` rounded to 2 decimal places. No
/// matching asset at all fails with `NoMatchingSectorData`; matches with
/// zero total exposure fail with `EmptyPortfolio` for the same reason
/// the physical index does.
pub fn derive_carbon_price(
    sector_scores: &SectorScores,
    assets: &[Asset],
) -> ClimateRiskResult<ComputationOutput<DerivedShockParameter>> {
    let start = Instant::now();

    let mut weighted_sum = Decimal::ZERO;
    let mut total_exposure = Decimal::ZERO;
    let mut matched = 0usize;

    for asset in assets {
        let sector = asset
            .sector
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SECTOR);
        if let Some(score) = sector_scores.get(sector) {
            let exposure = asset.exposure.max(Decimal::ZERO);
            weighted_sum += *score * exposure;
            total_exposure += exposure;
            matched += 1;
        }
    }

    if matched == 0 {
        return Err(ClimateRiskError::NoMatchingSectorData(
            "no portfolio sector appears in the sector score table".into(),
        ));
    }
    if total_exposure.is_zero() {
        return Err(ClimateRiskError::EmptyPortfolio(
            "matched assets carry no exposure; cannot derive a carbon price".into(),
        ));
    }

    let avg_score = weighted_sum / total_exposure;
    let price = ((avg_score - Decimal::ONE) * PRICE_PER_SCORE_POINT)
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let parameter = DerivedShockParameter {
        kind: ShockKind::CarbonPrice,
        value: price,
        provenance: vec![format!(
            "{} sector scores applied to {} of {} assets",
            sector_scores.len(),
            matched,
            assets.len()
        )],
        derived_at: Utc::now(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "formula": "max(0, (sum(score * exposure) / sum(exposure) - 1) * 10)",
        "unit": "currency units per tCO2e",
        "sector_default": DEFAULT_SECTOR,
        "rounding": "2 dp, half away from zero",
        "staleness": "not auto-recomputed; re-derive explicitly after new runs",
    });

    Ok(with_metadata(
        "Implied Carbon Price (sector-score weighted)",
        &assumptions,
        Vec::new(),
        elapsed,
        parameter,
    ))
}
