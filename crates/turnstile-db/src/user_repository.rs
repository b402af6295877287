use sqlx::{PgPool, Pool, Postgres};
use turnstile_core::error::AppError;
use turnstile_core::models::{NewUser, User};
use turnstile_core::traits::USER_NOT_FOUND;

/// Repository for user persistence in PostgreSQL.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Returns the generated id.
    pub async fn create_user(&self, user: &NewUser) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (email, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                tracing::debug!("Duplicate email rejected by users_email_key");
            }
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.0)
    }

    /// Fetch a user, digest included, by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(Into::into)
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password: row.password,
        }
    }
}

// -- Trait implementation --

impl turnstile_core::traits::UserStore for UserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<i64, AppError> {
        UserRepository::create_user(self, user).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, AppError> {
        UserRepository::find_user_by_email(self, email).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        UserRepository::health_check(self).await
    }
}
