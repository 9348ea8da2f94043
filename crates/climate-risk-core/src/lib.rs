pub mod error;
pub mod types;

pub mod assessment;
pub mod reporting;
pub mod shock;
pub mod store;

pub use error::ClimateRiskError;
pub use types::*;

/// Standard result type for all climate-risk operations
pub type ClimateRiskResult<T> = Result<T, ClimateRiskError>;
