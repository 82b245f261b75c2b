//! User loader for batched fetching
//!
//! Batches user ID lookups from any edge that ends in a user (post author,
//! profile owner, both subscription directions) into one query per tick.
//! The `users` listing query primes this loader, so per-row traversals after
//! a full listing cost no additional queries.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::graphql::dataloader::Loader;
use crate::models::User;
use crate::repositories::utils::USER_COLUMNS;

/// Batch fetch of users by id
pub struct UserLoader {
    pool: PgPool,
}

impl UserLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for UserLoader {
    type Key = Uuid;
    type Value = User;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, User>, Self::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        let users: Vec<User> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
