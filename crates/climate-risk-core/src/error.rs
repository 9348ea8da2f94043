use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateRiskError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Empty portfolio: {0}")]
    EmptyPortfolio(String),

    #[error("No matching sector data: {0}")]
    NoMatchingSectorData(String),

    #[error("Matrix index out of range: likelihood {likelihood}, impact {impact} (valid 0-4)")]
    IndexOutOfRange { likelihood: usize, impact: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ClimateRiskError {
    fn from(e: serde_json::Error) -> Self {
        ClimateRiskError::SerializationError(e.to_string())
    }
}
