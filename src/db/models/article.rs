//! Article model and queries.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::db::error::{is_foreign_key_violation, StoreError};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Short description shown under the title
    #[sqlx(rename = "desc")]
    pub subtitle: String,
    pub content: String,
    pub user_id: i64,
}

impl Article {
    /// Get an article by ID
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Article>, StoreError> {
        let article = sqlx::query_as(
            r#"SELECT id, title, "desc", content, user_id FROM articles WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(article)
    }

    /// Get all articles owned by a user, oldest first
    pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> Result<Vec<Article>, StoreError> {
        let articles = sqlx::query_as(
            r#"
            SELECT id, title, "desc", content, user_id
            FROM articles
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(articles)
    }

    /// Create an article owned by `user_id`.
    ///
    /// Fails with [`StoreError::ForeignKey`] when the user does not exist.
    pub async fn create(
        db: &SqlitePool,
        title: &str,
        subtitle: &str,
        content: &str,
        user_id: i64,
    ) -> Result<Article, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, "desc", content, user_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(subtitle)
        .bind(content)
        .bind(user_id)
        .execute(db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                StoreError::ForeignKey(user_id)
            } else {
                StoreError::Database(e)
            }
        })?;

        Self::find_by_id(db, result.last_insert_rowid())
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }
}
