use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `password` holds the bcrypt digest when loaded from the store. It is
/// never returned to a caller with content; see [`User::redacted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl User {
    /// Clear the password field before the record leaves the system.
    pub fn redacted(mut self) -> Self {
        self.password.clear();
        self
    }
}

/// DTO for inserting a new user into the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    /// bcrypt digest, never the plaintext
    pub password_digest: String,
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, in decimal
    pub sub: String,
    pub email: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Parse the user id back out of `sub`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
