//! Store-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this name already exists
    #[error("user name '{0}' is already taken")]
    DuplicateName(String),

    /// The referenced user does not exist
    #[error("user {0} does not exist")]
    ForeignKey(i64),

    #[error("failed to hash password: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Whether a sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Whether a sqlx error is a FOREIGN KEY constraint violation
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_foreign_key_violation(),
        _ => false,
    }
}
