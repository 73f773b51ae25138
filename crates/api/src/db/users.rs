//! User repository for database operations.
//!
//! Queries are runtime-bound (`sqlx::query_as`); rows are mapped into the
//! domain [`User`] with role and email validation on the way out.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use loommarket_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::user::User;

/// Raw row shape for the `users` table.
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i32,
    user_name: String,
    user_email: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.user_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let roles = self
            .roles
            .iter()
            .map(|r| Role::parse(r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
            })?;

        Ok(User {
            id: UserId::new(self.user_id),
            name: self.user_name,
            email,
            roles,
            created_at: self.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists
    /// (the unique constraint is the race-free backstop for the
    /// application-level duplicate check).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        roles: &[Role],
    ) -> Result<User, RepositoryError> {
        let role_tags: Vec<String> = roles.iter().map(|r| r.as_str().to_owned()).collect();

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (user_name, user_email, user_password, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, user_name, user_email, roles, created_at
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(&role_tags)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_user()
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if the email is not registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_with_password(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i32, String, String, Vec<String>, DateTime<Utc>, String)>(
            r"
            SELECT user_id, user_name, user_email, roles, created_at, user_password
            FROM users
            WHERE user_email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some((user_id, user_name, user_email, roles, created_at, password_hash)) = row else {
            return Ok(None);
        };

        let user = UserRow {
            user_id,
            user_name,
            user_email,
            roles,
            created_at,
        }
        .into_user()?;

        Ok(Some((user, password_hash)))
    }

    /// Get a user by their ID.
    ///
    /// Used by the authorization gate to re-resolve token subjects against
    /// the live account record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT user_id, user_name, user_email, roles, created_at
            FROM users
            WHERE user_id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}
