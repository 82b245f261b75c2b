//! Posts-by-author loader for batched fetching
//!
//! Grouped one-to-many loader: each requested author id resolves to the
//! (possibly empty) list of that author's posts. An author with no posts and
//! an unknown author id both resolve to an empty list; this layer does not
//! distinguish them.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use super::group_by;
use crate::graphql::dataloader::Loader;
use crate::models::Post;
use crate::repositories::utils::POST_COLUMNS;

/// Batch fetch of posts grouped by author id
pub struct PostsByAuthorLoader {
    pool: PgPool,
}

impl PostsByAuthorLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for PostsByAuthorLoader {
    type Key = Uuid;
    type Value = Vec<Post>;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Vec<Post>>, Self::Error> {
        let sql = format!("SELECT {} FROM posts WHERE author_id = ANY($1)", POST_COLUMNS);
        let posts: Vec<Post> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(group_by(keys, posts, |post| post.author_id))
    }
}
