//! Error taxonomy for repository operations.
//!
//! Constraint violations, missing rows, and unresolved references are kept
//! apart so the transport layer can report each one precisely.

use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during persistence.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The requested root row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// A duplicate key, foreign-key violation, or ownership clash.
    #[error("persistence conflict: {0}")]
    Conflict(String),

    /// A stored reference points to a row that no longer exists.
    #[error("dangling reference from {entity} {id} to {reference}")]
    DanglingReference {
        /// Kind of entity holding the reference.
        entity: &'static str,
        /// Identifier of the entity holding the reference.
        id: String,
        /// Description of the missing target.
        reference: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection error occurred.
    #[error("connection error: {0}")]
    Connection(String),
}

impl RepositoryError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a persistence conflict error.
    #[must_use]
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    /// Creates a dangling-reference error.
    #[must_use]
    pub fn dangling(entity: &'static str, id: impl ToString, reference: impl Into<String>) -> Self {
        Self::DanglingReference {
            entity,
            id: id.to_string(),
            reference: reference.into(),
        }
    }

    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};
        match &err {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => Self::Conflict(info.message().to_owned()),
            _ => Self::database(err),
        }
    }
}
