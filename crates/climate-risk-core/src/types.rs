use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ClimateRiskError;
use crate::ClimateRiskResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Impact, likelihood (1-5) and risk (1-25) scores.
pub type Score = u8;

/// A single loan/exposure record, owned by the upstream data-upload
/// module. The engine reads it and re-tags copies with computed scores;
/// it never mutates the uploaded record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    /// Asset-class label, e.g. "sme_loans"
    pub asset_class: String,
    /// Outstanding exposure; negative uploads are coerced to zero at
    /// assessment time, never propagated into sums.
    pub exposure: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
}

/// One asset class as delivered by the data-upload module:
/// `{ "type": "SME Loans", "data": [ ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetClassUpload {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<Asset>,
}

/// The full inbound portfolio: asset-class key to uploaded records.
/// Read-only from the engine's point of view.
pub type PortfolioUpload = BTreeMap<String, AssetClassUpload>;

/// The grouping key used to assign shared scores to assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMethod {
    Location,
    Region,
    Sector,
}

impl MappingMethod {
    /// Stable wire key, also embedded in scoring seeds.
    pub fn key(&self) -> &'static str {
        match self {
            MappingMethod::Location => "location",
            MappingMethod::Region => "region",
            MappingMethod::Sector => "sector",
        }
    }

    /// Display label for tabbed comparison views.
    pub fn label(&self) -> &'static str {
        match self {
            MappingMethod::Location => "By Location",
            MappingMethod::Region => "By Region",
            MappingMethod::Sector => "By Sector",
        }
    }
}

impl fmt::Display for MappingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Operator-authored setup for one hazard or transition-risk driver.
/// Immutable once a run completes; a new run produces new results, it
/// does not retroactively edit configuration history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfiguration {
    /// Stable identifier, e.g. "flood"
    pub risk_id: String,
    /// Human-readable name, e.g. "Flood / Coastal Inundation"
    pub risk_label: String,
    /// Mapping methods to run for this risk
    pub methods: Vec<MappingMethod>,
    /// Asset-class keys to include from the portfolio upload
    pub asset_classes: Vec<String>,
    /// Required free-text rationale for the assessment
    pub justification: String,
}

impl RiskConfiguration {
    /// Check the configuration is runnable. Raised before an assessment
    /// starts; the engine's own functions stay total.
    pub fn validate(&self) -> ClimateRiskResult<()> {
        if self.risk_id.trim().is_empty() {
            return Err(ClimateRiskError::InvalidInput {
                field: "risk_id".into(),
                reason: "A risk identifier is required.".into(),
            });
        }
        if self.methods.is_empty() {
            return Err(ClimateRiskError::InvalidInput {
                field: "methods".into(),
                reason: "At least one mapping method must be selected.".into(),
            });
        }
        if self.asset_classes.is_empty() {
            return Err(ClimateRiskError::InvalidInput {
                field: "asset_classes".into(),
                reason: "At least one asset class must be selected.".into(),
            });
        }
        if self.justification.trim().is_empty() {
            return Err(ClimateRiskError::InvalidInput {
                field: "justification".into(),
                reason: "A justification is required before running an assessment.".into(),
            });
        }
        Ok(())
    }
}

/// Qualitative banding of a 1-25 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskBand {
    /// Four-band classification used for matrix colouring and high-risk
    /// filtering. Scores below 6 all read as Low here.
    pub fn from_score(score: Score) -> Self {
        if score >= 20 {
            RiskBand::VeryHigh
        } else if score >= 12 {
            RiskBand::High
        } else if score >= 6 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    /// Five-band classification used in tabular narrative text, where
    /// scores of 1-2 are called out separately as Very Low.
    pub fn narrative(score: Score) -> Self {
        if score >= 20 {
            RiskBand::VeryHigh
        } else if score >= 12 {
            RiskBand::High
        } else if score >= 6 {
            RiskBand::Medium
        } else if score >= 3 {
            RiskBand::Low
        } else {
            RiskBand::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::VeryLow => "Very Low",
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
            RiskBand::VeryHigh => "Very High",
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_configuration() -> RiskConfiguration {
        RiskConfiguration {
            risk_id: "flood".into(),
            risk_label: "Flood".into(),
            methods: vec![MappingMethod::Sector, MappingMethod::Region],
            asset_classes: vec!["sme_loans".into()],
            justification: "Annual coastal flood review".into(),
        }
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(RiskBand::from_score(25), RiskBand::VeryHigh);
        assert_eq!(RiskBand::from_score(20), RiskBand::VeryHigh);
        assert_eq!(RiskBand::from_score(19), RiskBand::High);
        assert_eq!(RiskBand::from_score(12), RiskBand::High);
        assert_eq!(RiskBand::from_score(11), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(6), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(5), RiskBand::Low);
        assert_eq!(RiskBand::from_score(1), RiskBand::Low);
    }

    #[test]
    fn test_narrative_band_splits_very_low() {
        assert_eq!(RiskBand::narrative(5), RiskBand::Low);
        assert_eq!(RiskBand::narrative(3), RiskBand::Low);
        assert_eq!(RiskBand::narrative(2), RiskBand::VeryLow);
        assert_eq!(RiskBand::narrative(1), RiskBand::VeryLow);
    }

    #[test]
    fn test_method_keys_are_stable() {
        // These keys feed scoring seeds; changing one reshuffles every score.
        assert_eq!(MappingMethod::Location.key(), "location");
        assert_eq!(MappingMethod::Region.key(), "region");
        assert_eq!(MappingMethod::Sector.key(), "sector");
    }

    #[test]
    fn test_configuration_validates() {
        assert!(sample_configuration().validate().is_ok());
    }

    #[test]
    fn test_configuration_requires_justification() {
        let mut config = sample_configuration();
        config.justification = "   ".into();
        let err = config.validate().unwrap_err();
        match err {
            ClimateRiskError::InvalidInput { field, .. } => {
                assert_eq!(field, "justification");
            }
            other => panic!("Expected InvalidInput, got: {other:?}"),
        }
    }

    #[test]
    fn test_configuration_requires_methods_and_classes() {
        let mut config = sample_configuration();
        config.methods.clear();
        assert!(config.validate().is_err());

        let mut config = sample_configuration();
        config.asset_classes.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_asset_round_trips_through_json() {
        let asset = Asset {
            id: "L-001".into(),
            asset_class: "sme_loans".into(),
            exposure: dec!(250_000),
            sector: Some("Agriculture".into()),
            region: None,
            location: None,
            borrower: Some("Kofi Farms Ltd".into()),
        };
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, asset);
        // Absent optionals are omitted on the wire, not serialised as null
        assert!(!json.contains("region"));
    }
}
