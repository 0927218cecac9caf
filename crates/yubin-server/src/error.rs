use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use yubin_core::{AppError, UpstreamResponse};

use crate::dto::{ErrorResponse, Relay};

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self.0 {
            // Token endpoint failures are relayed verbatim, status and all.
            AppError::UpstreamTokenError { status, body } => {
                return Relay(UpstreamResponse::new(status, body)).into_response();
            }
            other => other,
        };

        let (status, error_type) = match &err {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            AppError::InvalidTokenResponse(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "invalid_token_response")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            tracing::error!(error_type, "{err}");
        } else {
            tracing::info!(error_type, "{err}");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: err.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
