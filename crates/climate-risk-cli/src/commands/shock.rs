use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use climate_risk_core::assessment::matrix::{run_configuration, select_assets, AssessmentResult};
use climate_risk_core::shock::physical::derive_physical_damage_index;
use climate_risk_core::shock::scenario::ShockMatrix;
use climate_risk_core::shock::transition::{derive_carbon_price, SectorScores};
use climate_risk_core::types::{Asset, PortfolioUpload, RiskConfiguration};

use super::read_typed;

/// Inputs for the physical damage index derivation. The optional
/// scenario context table is echoed back for presentation, never used
/// in the derivation itself.
#[derive(Debug, Deserialize)]
pub struct PhysicalShockInput {
    pub portfolio: PortfolioUpload,
    pub configuration: RiskConfiguration,
    #[serde(default)]
    pub scenario_context: Option<ShockMatrix>,
}

/// Inputs for the implied carbon price derivation.
#[derive(Debug, Deserialize)]
pub struct CarbonShockInput {
    pub sector_scores: SectorScores,
    pub portfolio: PortfolioUpload,
    /// Restrict to these asset classes; all classes when absent
    #[serde(default)]
    pub asset_classes: Option<Vec<String>>,
}

/// One row of the scenario context table as rendered next to a derived
/// parameter.
#[derive(Debug, Serialize)]
struct ContextRow {
    scenario: &'static str,
    horizon: &'static str,
    shock_pct: Decimal,
}

/// Arguments for the physical damage index
#[derive(Args)]
pub struct PhysicalShockArgs {
    /// Path to JSON/YAML input file with portfolio and configuration
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the implied carbon price
#[derive(Args)]
pub struct CarbonShockArgs {
    /// Path to JSON/YAML input file with sector scores and portfolio
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_physical_shock(args: PhysicalShockArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input: PhysicalShockInput = read_typed(&args.input, "physical-shock")?;

    let results: Vec<AssessmentResult> = run_configuration(&input.configuration, &input.portfolio)?
        .into_iter()
        .map(|output| output.result)
        .collect();
    let derived = derive_physical_damage_index(&results)?;

    match input.scenario_context {
        Some(context) => Ok(serde_json::json!({
            "derived": derived,
            "scenario_context": context_rows(&context),
        })),
        None => Ok(serde_json::to_value(derived)?),
    }
}

pub fn run_carbon_shock(args: CarbonShockArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input: CarbonShockInput = read_typed(&args.input, "carbon-shock")?;

    let assets: Vec<Asset> = match &input.asset_classes {
        Some(classes) => select_assets(&input.portfolio, classes),
        None => input
            .portfolio
            .values()
            .flat_map(|upload| upload.data.iter().cloned())
            .collect(),
    };

    let derived = derive_carbon_price(&input.sector_scores, &assets)?;
    Ok(serde_json::to_value(derived)?)
}

fn context_rows(matrix: &ShockMatrix) -> Vec<ContextRow> {
    matrix
        .entries()
        .into_iter()
        .map(|(scenario, horizon, shock_pct)| ContextRow {
            scenario: scenario.as_str(),
            horizon: horizon.as_str(),
            shock_pct,
        })
        .collect()
}
