//! The assessment pipeline: group assets, score each group, aggregate
//! into a 5×5 impact-likelihood matrix.

pub mod grouping;
pub mod matrix;
pub mod scoring;
