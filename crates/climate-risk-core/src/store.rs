use serde::{Deserialize, Serialize};

use crate::assessment::matrix::AssessmentResult;
use crate::types::MappingMethod;

/// Session-scoped cache of assessment results keyed by (risk_id, method).
///
/// A pure key-value store: it never recomputes anything. Upsert replaces
/// the whole result for an existing key in place, so a reader can never
/// observe a matrix from one run next to the asset list of another, and
/// first-insertion order of keys is preserved for deterministic
/// flattening. Instantiate once per session and pass by reference; there
/// is no hidden global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultStore {
    results: Vec<AssessmentResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the result for (result.risk_id, result.method).
    /// Results for other keys are untouched.
    pub fn upsert(&mut self, result: AssessmentResult) {
        match self
            .results
            .iter_mut()
            .find(|r| r.risk_id == result.risk_id && r.method == result.method)
        {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    pub fn get(&self, risk_id: &str, method: MappingMethod) -> Option<&AssessmentResult> {
        self.results
            .iter()
            .find(|r| r.risk_id == risk_id && r.method == method)
    }

    /// All stored results in first-insertion order of their keys.
    pub fn all_results(&self) -> &[AssessmentResult] {
        &self.results
    }

    /// Drop every method's result for the given risk.
    pub fn remove(&mut self, risk_id: &str) {
        self.results.retain(|r| r.risk_id != risk_id);
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::matrix::{run_assessment, AssessmentInput};
    use crate::types::Asset;
    use rust_decimal_macros::dec;

    fn result_for(risk_id: &str, method: MappingMethod, exposure: rust_decimal::Decimal) -> AssessmentResult {
        let input = AssessmentInput {
            risk_id: risk_id.into(),
            risk_label: risk_id.to_uppercase(),
            method,
            assets: vec![Asset {
                id: format!("{risk_id}-{method}"),
                asset_class: "sme_loans".into(),
                exposure,
                sector: Some("Agriculture".into()),
                region: None,
                location: None,
                borrower: None,
            }],
        };
        run_assessment(&input).unwrap().result
    }

    #[test]
    fn test_upsert_and_get() {
        let mut store = ResultStore::new();
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(100)));

        assert!(store.get("flood", MappingMethod::Sector).is_some());
        assert!(store.get("flood", MappingMethod::Region).is_none());
        assert!(store.get("drought", MappingMethod::Sector).is_none());
    }

    #[test]
    fn test_upsert_replaces_same_key_only() {
        let mut store = ResultStore::new();
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(100)));
        store.upsert(result_for("flood", MappingMethod::Region, dec!(200)));
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(999)));

        assert_eq!(store.len(), 2);
        let replaced = store.get("flood", MappingMethod::Sector).unwrap();
        assert_eq!(replaced.matrix.total_exposure(), dec!(999));
        // The replacement carries a consistent matrix and asset list
        assert_eq!(replaced.matrix.total_count() as usize, replaced.scored_assets.len());
        let untouched = store.get("flood", MappingMethod::Region).unwrap();
        assert_eq!(untouched.matrix.total_exposure(), dec!(200));
    }

    #[test]
    fn test_upsert_preserves_insertion_order() {
        let mut store = ResultStore::new();
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(1)));
        store.upsert(result_for("drought", MappingMethod::Sector, dec!(2)));
        // Re-running flood must not move it to the back
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(3)));

        let ids: Vec<&str> = store.all_results().iter().map(|r| r.risk_id.as_str()).collect();
        assert_eq!(ids, vec!["flood", "drought"]);
    }

    #[test]
    fn test_remove_drops_all_methods_for_risk() {
        let mut store = ResultStore::new();
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(1)));
        store.upsert(result_for("flood", MappingMethod::Region, dec!(2)));
        store.upsert(result_for("drought", MappingMethod::Sector, dec!(3)));

        store.remove("flood");
        assert_eq!(store.len(), 1);
        assert!(store.get("drought", MappingMethod::Sector).is_some());
    }

    #[test]
    fn test_clear() {
        let mut store = ResultStore::new();
        store.upsert(result_for("flood", MappingMethod::Sector, dec!(1)));
        store.clear();
        assert!(store.is_empty());
    }
}
