use serde::{Deserialize, Serialize};

use turnstile_core::models::User;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Body of `POST /signup` and `POST /login`. Absent fields read as empty.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// A user record as returned to callers. `password` is always empty.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let user = user.redacted();
        Self {
            id: user.id,
            email: user.email,
            password: user.password,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Protected
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProtectedResponse {
    pub message: String,
    pub id: i64,
    pub email: String,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Body of every failure response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
