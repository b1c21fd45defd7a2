//! Service orchestration for analyses.

mod analyses;

pub use analyses::{AnalysisError, AnalysisResult, AnalysisService};
