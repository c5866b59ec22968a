//! Analysis modules.
//!
//! Keyword classification of individual conversations and aggregation
//! of the results into an [`AnalysisSummary`](crate::models::AnalysisSummary).

pub mod aggregator;
pub mod classifier;

pub use aggregator::*;
