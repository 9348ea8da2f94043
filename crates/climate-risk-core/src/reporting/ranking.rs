use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assessment::matrix::{AssessmentResult, RiskMatrix, ScoredAsset};
use crate::store::ResultStore;
use crate::types::{MappingMethod, Money, Score};

/// Risk score at or above which an asset counts as high-risk for
/// contributor ranking (High band starts at 12; 10 also catches the
/// strongest Medium cells).
pub const HIGH_RISK_THRESHOLD: Score = 10;

/// How many contributors a ranking returns by default.
pub const DEFAULT_CONTRIBUTOR_LIMIT: usize = 5;

/// One (risk, method) entry of the tabbed comparison view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatResult {
    pub risk_id: String,
    pub risk_label: String,
    pub method: MappingMethod,
    pub method_label: String,
    pub matrix: RiskMatrix,
    pub scored_assets: Vec<ScoredAsset>,
}

/// A group's share of high-risk exposure within one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContributor {
    pub group_key: String,
    pub exposure: Money,
    /// Share of total high-risk exposure, 0-100. Zero when nothing in
    /// the result clears the threshold.
    pub pct_of_high_risk_exposure: Decimal,
}

/// Flatten the store into a browsable list, ordered by first-insertion
/// of risk_id and then of method within each risk, so tab order is
/// stable across renders.
pub fn flatten(store: &ResultStore) -> Vec<FlatResult> {
    let mut risk_order: Vec<&str> = Vec::new();
    for result in store.all_results() {
        if !risk_order.contains(&result.risk_id.as_str()) {
            risk_order.push(&result.risk_id);
        }
    }

    risk_order
        .into_iter()
        .flat_map(|risk_id| {
            store
                .all_results()
                .iter()
                .filter(move |r| r.risk_id == risk_id)
        })
        .map(|result| FlatResult {
            risk_id: result.risk_id.clone(),
            risk_label: result.risk_label.clone(),
            method: result.method,
            method_label: result.method.label().to_string(),
            matrix: result.matrix.clone(),
            scored_assets: result.scored_assets.clone(),
        })
        .collect()
}

/// Rank the groups contributing the most exposure among high-risk
/// assets of one result.
///
/// Filters scored assets to `risk_score >= threshold`, sums exposure per
/// group key, and returns the top `limit` groups by exposure with each
/// group's share of the high-risk total. An empty list (or an all-zero
/// exposure filter) yields shares of zero rather than a division by
/// zero.
pub fn top_contributors(
    result: &AssessmentResult,
    threshold: Score,
    limit: usize,
) -> Vec<TopContributor> {
    let mut by_group: Vec<(String, Money)> = Vec::new();
    let mut total = Decimal::ZERO;

    for scored in result.scored_assets.iter().filter(|s| s.risk_score >= threshold) {
        total += scored.asset.exposure;
        match by_group.iter_mut().find(|(key, _)| *key == scored.group_key) {
            Some(entry) => entry.1 += scored.asset.exposure,
            None => by_group.push((scored.group_key.clone(), scored.asset.exposure)),
        }
    }

    by_group.sort_by(|a, b| b.1.cmp(&a.1));
    by_group.truncate(limit);

    by_group
        .into_iter()
        .map(|(group_key, exposure)| {
            let pct_of_high_risk_exposure = if total > Decimal::ZERO {
                exposure / total * dec!(100)
            } else {
                Decimal::ZERO
            };
            TopContributor {
                group_key,
                exposure,
                pct_of_high_risk_exposure,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::assessment::matrix::{run_assessment, AssessmentInput};
    use crate::types::Asset;
    use rust_decimal_macros::dec;

    fn asset(id: &str, sector: &str, exposure: Decimal) -> Asset {
        Asset {
            id: id.into(),
            asset_class: "sme_loans".into(),
            exposure,
            sector: Some(sector.into()),
            region: None,
            location: None,
            borrower: None,
        }
    }

    fn scored(id: &str, group: &str, risk_score: Score, exposure: Decimal) -> ScoredAsset {
        // Factor the 1-25 product into a valid (impact, likelihood) pair
        let (impact, likelihood) = match risk_score {
            25 => (5, 5),
            20 => (4, 5),
            12 => (3, 4),
            6 => (2, 3),
            4 => (2, 2),
            1 => (1, 1),
            other => panic!("no factoring registered for {other}"),
        };
        ScoredAsset {
            asset: asset(id, group, exposure),
            group_key: group.into(),
            impact_score: impact,
            likelihood_score: likelihood,
            risk_score,
        }
    }

    fn result_with(scored_assets: Vec<ScoredAsset>) -> AssessmentResult {
        AssessmentResult {
            risk_id: "flood".into(),
            risk_label: "Flood".into(),
            method: MappingMethod::Sector,
            matrix: RiskMatrix::new(),
            scored_assets,
            run_at: Utc::now(),
        }
    }

    fn store_result(store: &mut ResultStore, risk_id: &str, method: MappingMethod) {
        let input = AssessmentInput {
            risk_id: risk_id.into(),
            risk_label: risk_id.to_uppercase(),
            method,
            assets: vec![asset("a", "Agriculture", dec!(100))],
        };
        store.upsert(run_assessment(&input).unwrap().result);
    }

    #[test]
    fn test_flatten_orders_by_risk_then_method_insertion() {
        let mut store = ResultStore::new();
        store_result(&mut store, "flood", MappingMethod::Sector);
        store_result(&mut store, "drought", MappingMethod::Sector);
        // flood gets a second method after drought was inserted
        store_result(&mut store, "flood", MappingMethod::Region);

        let flat = flatten(&store);
        let keys: Vec<(String, MappingMethod)> = flat
            .iter()
            .map(|f| (f.risk_id.clone(), f.method))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("flood".to_string(), MappingMethod::Sector),
                ("flood".to_string(), MappingMethod::Region),
                ("drought".to_string(), MappingMethod::Sector),
            ]
        );
    }

    #[test]
    fn test_flatten_carries_labels() {
        let mut store = ResultStore::new();
        store_result(&mut store, "flood", MappingMethod::Region);
        let flat = flatten(&store);
        assert_eq!(flat[0].risk_label, "FLOOD");
        assert_eq!(flat[0].method_label, "By Region");
    }

    #[test]
    fn test_flatten_empty_store() {
        assert!(flatten(&ResultStore::new()).is_empty());
    }

    #[test]
    fn test_top_contributors_ranks_by_exposure() {
        let result = result_with(vec![
            scored("a", "Agriculture", 20, dec!(500)),
            scored("b", "Agriculture", 12, dec!(300)),
            scored("c", "Mining", 25, dec!(600)),
            scored("d", "Tourism", 4, dec!(10_000)), // below threshold
        ]);

        let top = top_contributors(&result, HIGH_RISK_THRESHOLD, DEFAULT_CONTRIBUTOR_LIMIT);
        assert_eq!(top.len(), 2);
        // Agriculture 800 beats Mining 600
        assert_eq!(top[0].group_key, "Agriculture");
        assert_eq!(top[0].exposure, dec!(800));
        assert_eq!(top[1].group_key, "Mining");

        // Shares of the 1400 high-risk total
        let total = dec!(1_400);
        assert_eq!(top[0].pct_of_high_risk_exposure, dec!(800) / total * dec!(100));
        assert_eq!(top[1].pct_of_high_risk_exposure, dec!(600) / total * dec!(100));
    }

    #[test]
    fn test_top_contributors_respects_limit() {
        let result = result_with(vec![
            scored("a", "G1", 12, dec!(5)),
            scored("b", "G2", 12, dec!(4)),
            scored("c", "G3", 12, dec!(3)),
        ]);
        let top = top_contributors(&result, 10, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].group_key, "G1");
        assert_eq!(top[1].group_key, "G2");
    }

    #[test]
    fn test_top_contributors_no_high_risk_assets() {
        let result = result_with(vec![scored("a", "Agriculture", 4, dec!(100))]);
        let top = top_contributors(&result, 10, 5);
        assert!(top.is_empty());
    }

    #[test]
    fn test_top_contributors_zero_exposure_does_not_divide() {
        let result = result_with(vec![scored("a", "Agriculture", 20, dec!(0))]);
        let top = top_contributors(&result, 10, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].pct_of_high_risk_exposure, Decimal::ZERO);
    }
}
