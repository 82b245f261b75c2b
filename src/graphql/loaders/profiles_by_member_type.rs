//! Profiles-by-member-type loader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use super::group_by;
use crate::graphql::dataloader::Loader;
use crate::models::{MemberTypeId, Profile};
use crate::repositories::utils::PROFILE_COLUMNS;

/// Batch fetch of profiles grouped by member type
pub struct ProfilesByMemberTypeLoader {
    pool: PgPool,
}

impl ProfilesByMemberTypeLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader for ProfilesByMemberTypeLoader {
    type Key = MemberTypeId;
    type Value = Vec<Profile>;
    type Error = Arc<sqlx::Error>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Vec<Profile>>, Self::Error> {
        let ids: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        let sql = format!(
            "SELECT {} FROM profiles WHERE member_type_id = ANY($1)",
            PROFILE_COLUMNS
        );
        let profiles: Vec<Profile> = sqlx::query_as(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(group_by(keys, profiles, |profile| profile.member_type_id))
    }
}
