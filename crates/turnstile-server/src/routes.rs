use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use turnstile_core::{AppError, Claims, NewUser, User, UserStore};

use crate::auth::{INVALID_TOKEN, require_bearer_token};
use crate::config::ServerConfig;
use crate::dto::{
    CredentialsRequest, ErrorResponse, HealthResponse, ProtectedResponse, TokenResponse,
    UserResponse,
};
use crate::error::ApiError;
use crate::extract::LenientJson;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const EMAIL_MISSING: &str = "Email is missing.";
pub const PASSWORD_MISSING: &str = "Password is missing.";
pub const INVALID_PASSWORD: &str = "Invalid Password.";

/// Upper bound on request body size.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The router wrapped in the serving middleware: body limit, request
/// timeout, JSON bodies for bare error responses, tracing, and CORS.
pub fn app<S: UserStore>(state: Arc<AppState<S>>, config: &ServerConfig) -> Router {
    router(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(middleware::map_response(fill_empty_error_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Give error responses produced by middleware or the router itself (timeout,
/// unmatched method) the same `{message}` body as handler errors.
async fn fill_empty_error_body(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error())
        || response.headers().contains_key(CONTENT_TYPE)
    {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("Request failed").to_string();

    // Keep status and headers such as `Allow`; swap in a JSON body.
    let (mut parts, _) = response.into_parts();
    let (json_parts, body) = axum::Json(ErrorResponse { message })
        .into_response()
        .into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.extend(json_parts.headers);
    Response::from_parts(parts, body)
}

/// Build the full router with all routes and middleware.
pub fn router<S: UserStore>(state: Arc<AppState<S>>) -> Router {
    let protected = Router::new()
        .route("/protected", get(protected))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token::<S>,
        ));

    let public = Router::new()
        .route("/signup", post(signup::<S>))
        .route("/login", post(login::<S>))
        .route("/health", get(health::<S>))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(protected).with_state(state)
}

fn validate(body: &CredentialsRequest) -> Result<(), AppError> {
    if body.email.is_empty() {
        return Err(AppError::Validation(EMAIL_MISSING.into()));
    }
    if body.password.is_empty() {
        return Err(AppError::Validation(PASSWORD_MISSING.into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User created; password is always empty", body = UserResponse),
        (status = 400, description = "Email or password missing", body = crate::dto::ErrorResponse),
        (status = 500, description = "Store failure, including a duplicate email", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn signup<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    LenientJson(body): LenientJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&body)?;

    let password_digest = state.hasher.hash_blocking(body.password).await?;
    let new_user = NewUser {
        email: body.email,
        password_digest,
    };
    let id = state.store.create_user(&new_user).await?;

    tracing::info!(user_id = id, "User signed up");

    let user = User {
        id,
        email: new_user.email,
        password: new_user.password_digest,
    };
    Ok(axum::Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Session token, also sent in the Authorization header", body = TokenResponse),
        (status = 400, description = "Field missing or unknown user", body = crate::dto::ErrorResponse),
        (status = 401, description = "Wrong password", body = crate::dto::ErrorResponse),
        (status = 500, description = "Store or signing failure", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    LenientJson(body): LenientJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&body)?;

    let user = state.store.find_user_by_email(&body.email).await?;

    if !state
        .hasher
        .verify_blocking(user.password, body.password)
        .await?
    {
        tracing::warn!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::Unauthorized(INVALID_PASSWORD.into()).into());
    }

    let token = state.tokens.issue(user.id, &user.email)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        [(AUTHORIZATION, token.clone())],
        axum::Json(TokenResponse { token }),
    ))
}

// ---------------------------------------------------------------------------
// Protected
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/protected",
    responses(
        (status = 200, description = "Caller identity from the verified token", body = ProtectedResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn protected(
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let id = claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.into()))?;

    Ok(axum::Json(ProtectedResponse {
        message: "Protected endpoint invoked.".to_string(),
        id,
        email: claims.email,
    }))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health<S: UserStore>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    let db_status = match state.store.health_check().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!("Health check failed: {e}");
            "error"
        }
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
