//! `PostgreSQL` adapters for roster persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresRosterRepository;
