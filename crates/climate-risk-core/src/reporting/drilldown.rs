use crate::assessment::matrix::{AssessmentResult, ScoredAsset};
use crate::ClimateRiskResult;

/// Assets behind one matrix cell, sorted by exposure descending.
///
/// Backs the click-through from a matrix cell to its asset table.
/// Out-of-range indices fail with `IndexOutOfRange`; a valid but empty
/// cell returns an empty list.
pub fn cell_assets(
    result: &AssessmentResult,
    likelihood_index: usize,
    impact_index: usize,
) -> ClimateRiskResult<Vec<ScoredAsset>> {
    let cell = result.matrix.cell(likelihood_index, impact_index)?;
    let mut assets = cell.assets.clone();
    assets.sort_by(|a, b| b.asset.exposure.cmp(&a.asset.exposure));
    Ok(assets)
}
