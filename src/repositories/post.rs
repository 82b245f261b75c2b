//! Post repository for centralized database operations

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::POST_COLUMNS;
use crate::models::{CreatePost, Post, UpdatePost};

/// Repository for post database operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new PostRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a post by its unique ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find all posts
    pub async fn find_all(&self) -> Result<Vec<Post>, sqlx::Error> {
        let sql = format!("SELECT {} FROM posts", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await
    }

    /// Create a new post
    pub async fn create(&self, input: CreatePost) -> Result<Post, sqlx::Error> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(input.title)
            .bind(input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Update a post; returns None when no such post exists
    pub async fn update(&self, id: Uuid, input: UpdatePost) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!(
            "UPDATE posts SET title = COALESCE($2, title), content = COALESCE($3, content) \
             WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(input.title)
            .bind(input.content)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a post; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
