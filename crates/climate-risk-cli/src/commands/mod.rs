pub mod assess;
pub mod reporting;
pub mod shock;

use clap::ValueEnum;
use serde::de::DeserializeOwned;

use climate_risk_core::types::MappingMethod;

use crate::input;

/// Read a command's typed input from `--input <file>` or piped stdin.
pub fn read_typed<T: DeserializeOwned>(
    path: &Option<String>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_input(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file.json> or stdin required for {what}").into())
    }
}

/// Mapping method as a command-line flag value.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Location,
    Region,
    Sector,
}

impl From<MethodArg> for MappingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Location => MappingMethod::Location,
            MethodArg::Region => MappingMethod::Region,
            MethodArg::Sector => MappingMethod::Sector,
        }
    }
}
