use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use turnstile_core::{AppError, UserStore};

use crate::error::ApiError;
use crate::state::AppState;

/// Message for a missing or malformed `Authorization` header.
pub const INVALID_TOKEN: &str = "Invalid token.";

/// Pull the token out of an `Authorization: <scheme> <token>` header.
///
/// The header must split on single spaces into exactly two parts. The
/// scheme itself is not inspected.
pub fn bearer_token(header: Option<&HeaderValue>) -> Option<&str> {
    let value = header?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) => Some(token),
        _ => None,
    }
}

/// Middleware that admits requests carrying a valid session token.
///
/// On success the verified [`Claims`](turnstile_core::Claims) are stored in
/// the request extensions and the request is passed through untouched.
pub async fn require_bearer_token<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers().get(AUTHORIZATION)) else {
        tracing::warn!("Rejected request without a usable Authorization header");
        return Err(AppError::Unauthorized(INVALID_TOKEN.into()).into());
    };

    let claims = state.tokens.verify(token).inspect_err(|e| {
        tracing::warn!("Rejected bearer token: {e}");
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
