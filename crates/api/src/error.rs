use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::error::CoreError;
use marquee_core::search::InvalidFilter;
use marquee_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures, and adds HTTP-specific variants. Every variant is logged when it
/// is turned into a response; the response itself carries only a status code
/// and an empty body, so no internal detail reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marquee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store was unreachable or rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed or ambiguous request shape, rejected before any store call.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Core(CoreError::Validation(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::info!(entity, id, "Resource not found");
            }
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Rejected request");
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
            }
        }

        status.into_response()
    }
}

// ---------------------------------------------------------------------------
// Conversions from request-shape failures
// ---------------------------------------------------------------------------

impl From<InvalidFilter> for AppError {
    fn from(err: InvalidFilter) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
