//! Test utilities: an in-memory [`UserStore`].
//!
//! Mirrors the `users` table contract (store-assigned ids, unique email)
//! so the HTTP surface can be exercised without a database. Uses
//! `Arc<Mutex<_>>` so clones share state and tests can inject failures.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::traits::{USER_NOT_FOUND, UserStore};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    next_id: i64,
    failure: Option<String>,
}

/// In-memory user store with the same uniqueness rules as the SQL table.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a database error.
    pub fn fail_with(&self, message: &str) {
        self.inner.lock().unwrap().failure = Some(message.to_string());
    }

    /// Snapshot of the stored rows.
    pub fn users(&self) -> Vec<User> {
        self.inner.lock().unwrap().users.clone()
    }
}

impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: &NewUser) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(msg) = &inner.failure {
            return Err(AppError::DatabaseError(msg.clone()));
        }
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DatabaseError(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            ));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.users.push(User {
            id,
            email: user.email.clone(),
            password: user.password_digest.clone(),
        });
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, AppError> {
        let inner = self.inner.lock().unwrap();
        if let Some(msg) = &inner.failure {
            return Err(AppError::DatabaseError(msg.clone()));
        }
        inner
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        match &self.inner.lock().unwrap().failure {
            Some(msg) => Err(AppError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }
}
