//! User model and queries.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::crypto;
use crate::db::error::{is_unique_violation, StoreError};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Argon2 PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Get a user by ID
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as("SELECT id, name, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Get a user by name
    pub async fn find_by_name(db: &SqlitePool, name: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as("SELECT id, name, password FROM users WHERE name = ?")
            .bind(name)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Create a user, hashing the password before it reaches the table.
    ///
    /// Fails with [`StoreError::DuplicateName`] when the name is taken.
    pub async fn create(db: &SqlitePool, name: &str, password: &str) -> Result<User, StoreError> {
        let password_hash = crypto::hash_password(password)
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

        let result = sqlx::query("INSERT INTO users (name, password) VALUES (?, ?)")
            .bind(name)
            .bind(&password_hash)
            .execute(db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateName(name.to_string())
                } else {
                    StoreError::Database(e)
                }
            })?;

        Self::find_by_id(db, result.last_insert_rowid())
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// Look a user up by name and check the password.
    ///
    /// Returns `None` for an unknown name and for a wrong password alike.
    pub async fn authenticate(
        db: &SqlitePool,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = Self::find_by_name(db, name).await?;
        Ok(user.filter(|u| crypto::verify_password(password, &u.password)))
    }
}
