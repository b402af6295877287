use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use turnstile_core::error::AppError;

use crate::dto::ErrorResponse;

/// Message shown for every internal failure.
pub const SERVER_ERROR: &str = "Server error.";

/// Wrapper so we can implement `IntoResponse` for `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            // Unknown emails are reported as a bad request, not 404.
            AppError::Validation(_) | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            tracing::error!("Request failed: {}", self.0);
            SERVER_ERROR.to_string()
        };

        (status, axum::Json(ErrorResponse { message })).into_response()
    }
}
