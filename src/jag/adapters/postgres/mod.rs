//! `PostgreSQL` adapters for JAG persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresJagRepository;
