//! Read-side views over stored assessment results: flattened comparison
//! lists, top-exposure rankings, and per-cell drill-down.

pub mod drilldown;
pub mod ranking;
