//! User repository for centralized database operations
//!
//! This module provides all user-related database operations in a single
//! location, following the repository pattern. Relationship reads that the
//! GraphQL layer covers with loaders are deliberately absent here: resolvers
//! go through the loader layer, never through per-row queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::USER_COLUMNS;
use crate::models::{CreateUser, UpdateUser, User};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all users
    pub async fn find_all(&self) -> Result<Vec<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users ORDER BY name ASC", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await
    }

    /// Create a new user
    pub async fn create(&self, input: CreateUser) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (name, balance) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(input.name)
            .bind(input.balance)
            .fetch_one(&self.pool)
            .await
    }

    /// Update a user; returns None when no such user exists
    pub async fn update(&self, id: Uuid, input: UpdateUser) -> Result<Option<User>, sqlx::Error> {
        let sql = format!(
            "UPDATE users SET name = COALESCE($2, name), balance = COALESCE($3, balance) \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(input.name)
            .bind(input.balance)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a user; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
