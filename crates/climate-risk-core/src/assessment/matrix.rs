use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assessment::grouping::group_assets;
use crate::assessment::scoring::{
    score_seed, HashScorer, ScoreModel, IMPACT_AXIS, LIKELIHOOD_AXIS,
};
use crate::error::ClimateRiskError;
use crate::types::{
    with_metadata, Asset, ComputationOutput, MappingMethod, Money, PortfolioUpload, RiskBand,
    RiskConfiguration, Score,
};
use crate::ClimateRiskResult;

/// Impact and likelihood both score 1-5, so the matrix is 5×5.
pub const MATRIX_DIM: usize = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An asset re-tagged with the scores of its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAsset {
    pub asset: Asset,
    /// The grouping key the scores were derived from
    pub group_key: String,
    /// Severity, 1-5
    pub impact_score: Score,
    /// Probability, 1-5
    pub likelihood_score: Score,
    /// impact × likelihood, 1-25
    pub risk_score: Score,
}

impl ScoredAsset {
    /// Four-band label used for colouring and filtering.
    pub fn band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}

/// One cell of the impact-likelihood grid. `count` always equals
/// `assets.len()` and `exposure` the sum of their exposures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub count: u32,
    pub exposure: Money,
    pub assets: Vec<ScoredAsset>,
}

/// The aggregated 5×5 grid, indexed `[likelihoodIndex][impactIndex]`
/// with both indices in 0-4 (score minus one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrix {
    cells: [[MatrixCell; MATRIX_DIM]; MATRIX_DIM],
}

impl RiskMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at (likelihoodIndex, impactIndex), or `IndexOutOfRange`.
    pub fn cell(&self, likelihood_index: usize, impact_index: usize) -> ClimateRiskResult<&MatrixCell> {
        if likelihood_index >= MATRIX_DIM || impact_index >= MATRIX_DIM {
            return Err(ClimateRiskError::IndexOutOfRange {
                likelihood: likelihood_index,
                impact: impact_index,
            });
        }
        Ok(&self.cells[likelihood_index][impact_index])
    }

    /// Iterate populated and empty cells as (likelihoodIndex, impactIndex, cell).
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &MatrixCell)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(li, row)| row.iter().enumerate().map(move |(ii, cell)| (li, ii, cell)))
    }

    /// Total asset count across all cells.
    pub fn total_count(&self) -> u32 {
        self.iter_cells().map(|(_, _, c)| c.count).sum()
    }

    /// Total exposure across all cells.
    pub fn total_exposure(&self) -> Money {
        self.iter_cells().map(|(_, _, c)| c.exposure).sum()
    }

    fn place(&mut self, scored: ScoredAsset) {
        let li = usize::from(scored.likelihood_score - 1);
        let ii = usize::from(scored.impact_score - 1);
        let cell = &mut self.cells[li][ii];
        cell.count += 1;
        cell.exposure += scored.asset.exposure;
        cell.assets.push(scored);
    }
}

/// Inputs for one assessment run: one risk, one method, the selected
/// asset slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub risk_id: String,
    pub risk_label: String,
    pub method: MappingMethod,
    pub assets: Vec<Asset>,
}

/// The stored outcome of one (risk, method) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub risk_id: String,
    pub risk_label: String,
    pub method: MappingMethod,
    pub matrix: RiskMatrix,
    pub scored_assets: Vec<ScoredAsset>,
    pub run_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run one assessment with the default hash scorer.
pub fn run_assessment(
    input: &AssessmentInput,
) -> ClimateRiskResult<ComputationOutput<AssessmentResult>> {
    run_assessment_with(input, &HashScorer)
}

/// Run one assessment with an explicit score model.
pub fn run_assessment_with(
    input: &AssessmentInput,
    scorer: &dyn ScoreModel,
) -> ClimateRiskResult<ComputationOutput<AssessmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let assets = sanitize_exposures(&input.assets, &mut warnings);
    let (matrix, scored_assets) = build_matrix(&assets, &input.risk_id, input.method, scorer);

    let result = AssessmentResult {
        risk_id: input.risk_id.clone(),
        risk_label: input.risk_label.clone(),
        method: input.method,
        matrix,
        scored_assets,
        run_at: Utc::now(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "scoring": "deterministic string-hash placeholder classifier, not a hazard model",
        "seed_format": "{risk_id}-{method}-{group_key}-{axis}",
        "score_range": "impact and likelihood 1-5; risk = impact * likelihood",
        "negative_exposure": "coerced to zero",
        "band_thresholds": ">=20 Very High, >=12 High, >=6 Medium, else Low",
    });

    Ok(with_metadata(
        "Impact-Likelihood Matrix Aggregation (5x5, exposure-weighted)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Group, score, and aggregate a clean asset list into a matrix.
///
/// Every asset in a group shares the group's (impact, likelihood) pair
/// and lands in the cell at `[likelihood-1][impact-1]`. An empty asset
/// list yields an all-zero matrix. Negative exposures are clamped here
/// too so cell sums can never go negative.
pub fn build_matrix(
    assets: &[Asset],
    risk_id: &str,
    method: MappingMethod,
    scorer: &dyn ScoreModel,
) -> (RiskMatrix, Vec<ScoredAsset>) {
    let mut matrix = RiskMatrix::new();
    let mut scored_assets: Vec<ScoredAsset> = Vec::with_capacity(assets.len());

    for (group_key, group) in group_assets(assets, method) {
        let impact = scorer.score(&score_seed(risk_id, method, &group_key, IMPACT_AXIS));
        let likelihood = scorer.score(&score_seed(risk_id, method, &group_key, LIKELIHOOD_AXIS));

        for mut asset in group {
            asset.exposure = asset.exposure.max(Decimal::ZERO);
            let scored = ScoredAsset {
                asset,
                group_key: group_key.clone(),
                impact_score: impact,
                likelihood_score: likelihood,
                risk_score: impact * likelihood,
            };
            matrix.place(scored.clone());
            scored_assets.push(scored);
        }
    }

    (matrix, scored_assets)
}

/// Validate a configuration, pull its asset classes out of the upload,
/// and run one assessment per configured method.
pub fn run_configuration(
    config: &RiskConfiguration,
    portfolio: &PortfolioUpload,
) -> ClimateRiskResult<Vec<ComputationOutput<AssessmentResult>>> {
    config.validate()?;
    let assets = select_assets(portfolio, &config.asset_classes);

    config
        .methods
        .iter()
        .map(|&method| {
            run_assessment(&AssessmentInput {
                risk_id: config.risk_id.clone(),
                risk_label: config.risk_label.clone(),
                method,
                assets: assets.clone(),
            })
        })
        .collect()
}

/// Flatten the selected asset classes of a portfolio upload into one
/// asset list. Unknown class keys are skipped; selection never fails.
pub fn select_assets(portfolio: &PortfolioUpload, asset_classes: &[String]) -> Vec<Asset> {
    asset_classes
        .iter()
        .filter_map(|key| portfolio.get(key))
        .flat_map(|upload| upload.data.iter().cloned())
        .collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Clamp negative exposures to zero, reporting each through warnings.
fn sanitize_exposures(assets: &[Asset], warnings: &mut Vec<String>) -> Vec<Asset> {
    assets
        .iter()
        .map(|asset| {
            if asset.exposure < Decimal::ZERO {
                warnings.push(format!(
                    "Asset '{}' has negative exposure {}; treated as zero.",
                    asset.id, asset.exposure
                ));
                let mut cleaned = asset.clone();
                cleaned.exposure = Decimal::ZERO;
                cleaned
            } else {
                asset.clone()
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
