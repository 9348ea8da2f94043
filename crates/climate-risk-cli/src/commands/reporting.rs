use clap::Args;
use serde_json::Value;

use climate_risk_core::assessment::matrix::{run_assessment, select_assets, AssessmentInput};
use climate_risk_core::reporting::{drilldown, ranking};

use super::assess::AssessInput;
use super::{read_typed, MethodArg};

/// Arguments for ranking high-risk contributors
#[derive(Args)]
pub struct ContributorsArgs {
    /// Path to JSON/YAML input file with portfolio and configuration
    #[arg(long)]
    pub input: Option<String>,

    /// Mapping method to rank under
    #[arg(long, value_enum)]
    pub method: MethodArg,

    /// Minimum risk score (1-25) counting as high-risk
    #[arg(long, default_value_t = ranking::HIGH_RISK_THRESHOLD)]
    pub threshold: u8,

    /// Maximum number of contributors returned
    #[arg(long, default_value_t = ranking::DEFAULT_CONTRIBUTOR_LIMIT)]
    pub limit: usize,
}

/// Arguments for listing the assets behind one matrix cell
#[derive(Args)]
pub struct DrillDownArgs {
    /// Path to JSON/YAML input file with portfolio and configuration
    #[arg(long)]
    pub input: Option<String>,

    /// Mapping method of the result to drill into
    #[arg(long, value_enum)]
    pub method: MethodArg,

    /// Likelihood index of the cell (0-4)
    #[arg(long)]
    pub likelihood: usize,

    /// Impact index of the cell (0-4)
    #[arg(long)]
    pub impact: usize,
}

pub fn run_top_contributors(args: ContributorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = assess_single_method(&args.input, args.method, "top-contributors")?;
    let top = ranking::top_contributors(&result, args.threshold, args.limit);
    Ok(serde_json::to_value(top)?)
}

pub fn run_drill_down(args: DrillDownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = assess_single_method(&args.input, args.method, "drill-down")?;
    let assets = drilldown::cell_assets(&result, args.likelihood, args.impact)?;
    Ok(serde_json::to_value(assets)?)
}

/// Re-run the configuration's selection for one method. The engine is
/// deterministic, so recomputing here matches whatever a prior `assess`
/// run produced for the same inputs.
fn assess_single_method(
    input: &Option<String>,
    method: MethodArg,
    what: &str,
) -> Result<climate_risk_core::assessment::matrix::AssessmentResult, Box<dyn std::error::Error>> {
    let input: AssessInput = read_typed(input, what)?;
    input.configuration.validate()?;

    let assets = select_assets(&input.portfolio, &input.configuration.asset_classes);
    let output = run_assessment(&AssessmentInput {
        risk_id: input.configuration.risk_id.clone(),
        risk_label: input.configuration.risk_label.clone(),
        method: method.into(),
        assets,
    })?;
    Ok(output.result)
}
