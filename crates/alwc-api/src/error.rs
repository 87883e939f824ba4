//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use alwc_core::error::{AppError, ErrorKind};
use alwc_core::types::ApiErrorResponse;

/// Handler-side error: an [`AppError`] on its way to becoming a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result alias for handlers and extractors.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthenticated | ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Misconfigured
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::ExternalService
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        // Server-side messages stay in the logs.
        let message = match err.kind {
            ErrorKind::Misconfigured => {
                error!(error = %err.message, "Server configuration error");
                "Server configuration error".to_string()
            }
            kind if kind.is_client_error() => err.message,
            kind => {
                error!(
                    kind = %kind,
                    error = %err.message,
                    source = ?err.source,
                    "Request failed"
                );
                "Internal server error".to_string()
            }
        };

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(message = %message, "Rate limit rejected request");
        }

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
