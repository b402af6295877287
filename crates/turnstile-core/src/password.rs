//! Password hashing with bcrypt.

use crate::error::AppError;

/// Default bcrypt cost factor.
pub const DEFAULT_COST: u32 = 10;

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Salted, adaptive password hasher.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> Result<Self, AppError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AppError::ConfigError(format!(
                "bcrypt cost {cost} out of range {MIN_COST}..={MAX_COST}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted digest of `plaintext`.
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| AppError::HashError(e.to_string()))
    }

    /// Check `candidate` against a stored digest.
    ///
    /// A malformed digest counts as a mismatch.
    pub fn verify(&self, digest: &str, candidate: &str) -> bool {
        match bcrypt::verify(candidate, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password digest could not be parsed: {e}");
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::HashError(format!("hashing task failed: {e}")))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    ///
    /// A mismatch is `Ok(false)`; only a failed task is an error.
    pub async fn verify_blocking(
        &self,
        digest: String,
        candidate: String,
    ) -> Result<bool, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&digest, &candidate))
            .await
            .map_err(|e| AppError::HashError(format!("verification task failed: {e}")))
    }
}
