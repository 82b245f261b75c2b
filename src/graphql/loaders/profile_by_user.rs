//! Profile-by-user loader for batched fetching
//!
//! Keyed by the owning user's id (`profiles.user_id` is unique), so this is
//! a direct lookup through a foreign key: one profile or none per user.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::graphql::dataloader::Loader;
use crate::models::Profile;
use crate::repositories::utils::PROFILE_COLUMNS;

/// Batch fetch of profiles by owning user id
pub struct ProfileByUserLoader {
    pool: PgPool,
}

impl ProfileByUserLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for ProfileByUserLoader {
    type Key = Uuid;
    type Value = Profile;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Profile>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ANY($1)",
            PROFILE_COLUMNS
        );
        let profiles: Vec<Profile> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(profiles.into_iter().map(|p| (p.user_id, p)).collect())
    }
}
