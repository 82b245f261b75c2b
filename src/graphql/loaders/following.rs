//! Following loader: accounts a user is subscribed to
//!
//! Junction loader over subscribers_on_authors, keyed by the subscriber
//! side and projecting author ids. The mirror direction lives in its own
//! loader type ([`super::FollowersLoader`]); keeping the two as distinct
//! types makes it impossible to query the junction by the wrong side.
//!
//! The loader yields related *ids*; resolvers compose with the user loader
//! to materialize entities, and that second hop batches independently.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use super::group_by;
use crate::graphql::dataloader::Loader;
use crate::models::Subscription;
use crate::repositories::utils::SUBSCRIPTION_COLUMNS;

/// Batch fetch of followed author ids grouped by subscriber id
pub struct FollowingLoader {
    pool: PgPool,
}

impl FollowingLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for FollowingLoader {
    type Key = Uuid;
    type Value = Vec<Uuid>;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Vec<Uuid>>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM subscribers_on_authors WHERE subscriber_id = ANY($1)",
            SUBSCRIPTION_COLUMNS
        );
        let links: Vec<Subscription> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(group_links(keys, links))
    }
}

/// Group junction rows by subscriber, projecting the author side
pub(super) fn group_links(keys: &[Uuid], links: Vec<Subscription>) -> HashMap<Uuid, Vec<Uuid>> {
    group_by(keys, links, |link| link.subscriber_id)
        .into_iter()
        .map(|(key, links)| (key, links.into_iter().map(|l| l.author_id).collect()))
        .collect()
}
