//! Domain model for analyses.

mod analysis;
mod error;
mod ids;

pub use analysis::Analysis;
pub use error::AnalysisDomainError;
pub use ids::AnalysisId;
