//! Followers loader: accounts subscribed to a user
//!
//! Mirror of [`super::FollowingLoader`]: keyed by the author side of the
//! junction, projecting subscriber ids. The SQL predicate and the projected
//! column are both flipped relative to the following direction; the two
//! loaders share nothing but the grouping helper.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use super::group_by;
use crate::graphql::dataloader::Loader;
use crate::models::Subscription;
use crate::repositories::utils::SUBSCRIPTION_COLUMNS;

/// Batch fetch of subscriber ids grouped by author id
pub struct FollowersLoader {
    pool: PgPool,
}

impl FollowersLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for FollowersLoader {
    type Key = Uuid;
    type Value = Vec<Uuid>;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Vec<Uuid>>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM subscribers_on_authors WHERE author_id = ANY($1)",
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

/// Group junction rows by author, projecting the subscriber side
pub(super) fn group_links(keys: &[Uuid], links: Vec<Subscription>) -> HashMap<Uuid, Vec<Uuid>> {
    group_by(keys, links, |link| link.author_id)
        .into_iter()
        .map(|(key, links)| (key, links.into_iter().map(|l| l.subscriber_id).collect()))
        .collect()
}
