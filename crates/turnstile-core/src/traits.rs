use std::future::Future;

use crate::error::AppError;
use crate::models::{NewUser, User};

/// Persists and looks up user records.
pub trait UserStore: Send + Sync + Clone + 'static {
    /// Insert a user. Returns the id assigned by the store.
    ///
    /// Fails with [`AppError::DatabaseError`] on any insert failure,
    /// including a duplicate email.
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Fetch a user by email, digest included.
    ///
    /// Fails with [`AppError::NotFound`] when no row matches.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<User, AppError>> + Send;

    /// Check store connectivity.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Message returned when a login names an unknown email.
pub const USER_NOT_FOUND: &str = "The user does not exist.";
