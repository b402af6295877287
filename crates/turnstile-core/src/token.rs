//! Signed, stateless session tokens (JWT, HMAC family).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::error::AppError;
use crate::models::Claims;

/// Algorithm used for newly issued tokens.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms accepted at verification. Anything outside the HMAC family
/// is rejected, whatever the token header claims.
pub const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Default token lifetime: 24 hours.
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Issues and verifies session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build a token service from the signing secret.
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::ConfigError("signing secret is empty".into()));
        }
        if ttl <= Duration::zero() {
            return Err(AppError::ConfigError("token lifetime must be positive".into()));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token binding `user_id` and `email`.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AppError::TokenError(e.to_string()))
    }

    /// Check signature, algorithm family and expiry; return the claims.
    ///
    /// Every failure is [`AppError::Unauthorized`] carrying the
    /// verification error text.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(e.to_string()))
    }
}
