//! Port contracts for analysis persistence.

pub mod repository;

pub use repository::AnalysisRepository;
