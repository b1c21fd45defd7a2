//! Translation of service failures into HTTP responses.
//!
//! Every error body has the shape `{"error": {"kind": ..., "message": ...}}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::activity::services::ActivityCatalogueError;
use crate::analysis::services::AnalysisError;
use crate::jag::services::JagProjectError;
use crate::persistence::RepositoryError;
use crate::schema::ports::SchemaError;
use crate::team::services::RosterError;

/// Coarse failure category reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request body failed validation.
    Validation,
    /// The requested root entity does not exist.
    NotFound,
    /// A key, ownership, or foreign-key constraint was violated.
    Conflict,
    /// A stored reference points at a missing row.
    DanglingReference,
    /// The store failed for another reason.
    Persistence,
}

impl ErrorKind {
    const fn status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::DanglingReference | Self::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by every handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(err: &impl ToString) -> Self {
        Self::new(ErrorKind::Validation, err.to_string())
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    kind: ErrorKind,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = ?self.kind, message = %self.message, "request failed");
        } else {
            tracing::debug!(kind = ?self.kind, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                kind: self.kind,
                message: &self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::Validation, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(ErrorKind::Validation, rejection.body_text())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let kind = match &err {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::Conflict(_) => ErrorKind::Conflict,
            RepositoryError::DanglingReference { .. } => ErrorKind::DanglingReference,
            RepositoryError::Database(_) | RepositoryError::Connection(_) => ErrorKind::Persistence,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<ActivityCatalogueError> for ApiError {
    fn from(err: ActivityCatalogueError) -> Self {
        match err {
            ActivityCatalogueError::Domain(domain) => Self::validation(&domain),
            ActivityCatalogueError::Repository(repository) => repository.into(),
        }
    }
}

impl From<JagProjectError> for ApiError {
    fn from(err: JagProjectError) -> Self {
        match err {
            JagProjectError::Domain(domain) => Self::validation(&domain),
            JagProjectError::Repository(repository) => repository.into(),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Domain(domain) => Self::validation(&domain),
            RosterError::Repository(repository) => repository.into(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Domain(domain) => Self::validation(&domain),
            AnalysisError::Repository(repository) => repository.into(),
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ForeignKeyViolation { .. } => {
                Self::new(ErrorKind::Conflict, err.to_string())
            }
            SchemaError::Plan(plan) => Self::new(ErrorKind::Persistence, plan.to_string()),
            SchemaError::Repository(repository) => repository.into(),
        }
    }
}
