//! `PostgreSQL` adapters for analysis persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresAnalysisRepository;
