use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use climate_risk_core::assessment::matrix::run_configuration;
use climate_risk_core::reporting::ranking;
use climate_risk_core::store::ResultStore;
use climate_risk_core::types::{PortfolioUpload, RiskConfiguration};

use super::read_typed;

/// A portfolio upload plus one risk configuration.
#[derive(Debug, Deserialize)]
pub struct AssessInput {
    pub portfolio: PortfolioUpload,
    pub configuration: RiskConfiguration,
}

/// A portfolio upload plus the configurations to compare side by side.
#[derive(Debug, Deserialize)]
pub struct CompareInput {
    pub portfolio: PortfolioUpload,
    pub configurations: Vec<RiskConfiguration>,
}

/// Arguments for running one risk configuration
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON/YAML input file with portfolio and configuration
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the flattened comparison view
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file with portfolio and configurations
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input: AssessInput = read_typed(&args.input, "assess")?;
    let outputs = run_configuration(&input.configuration, &input.portfolio)?;
    Ok(serde_json::to_value(outputs)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input: CompareInput = read_typed(&args.input, "compare")?;

    let mut store = ResultStore::new();
    for config in &input.configurations {
        for output in run_configuration(config, &input.portfolio)? {
            store.upsert(output.result);
        }
    }

    Ok(serde_json::to_value(ranking::flatten(&store))?)
}
