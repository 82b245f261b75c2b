//! Member type loader for batched fetching
//!
//! Keyed by the `MemberTypeId` enum rather than a UUID; loader keys only
//! need equality and hashing.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::graphql::dataloader::Loader;
use crate::models::{MemberType, MemberTypeId};
use crate::repositories::utils::MEMBER_TYPE_COLUMNS;

/// Batch fetch of member types by tier identifier
pub struct MemberTypeLoader {
    pool: PgPool,
}

impl MemberTypeLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for MemberTypeLoader {
    type Key = MemberTypeId;
    type Value = MemberType;
    type Error = Arc<sqlx::Error>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, MemberType>, Self::Error> {
        let ids: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = ANY($1)",
            MEMBER_TYPE_COLUMNS
        );
        let member_types: Vec<MemberType> = sqlx::query_as(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(member_types.into_iter().map(|m| (m.id, m)).collect())
    }
}
