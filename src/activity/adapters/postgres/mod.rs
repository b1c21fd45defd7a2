//! `PostgreSQL` adapters for activity persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresActivityRepository;
