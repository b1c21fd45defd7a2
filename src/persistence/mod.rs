//! Storage plumbing shared by every bounded context.
//!
//! - [`error`]: the repository error taxonomy
//! - [`postgres`]: pooled, transactional Diesel execution
//! - [`memory`]: a transactional in-memory database for tests and demos

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::InMemoryDatabase;
pub use postgres::{PgPool, PgStore, build_pool};
