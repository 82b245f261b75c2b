//! MemberType GraphQL type

use async_graphql::{Context, Object, Result};

use crate::graphql::dataloader::DataLoader;
use crate::graphql::loaders::ProfilesByMemberTypeLoader;
use crate::models::{MemberType as DbMemberType, MemberTypeId};

use super::profile::Profile;

/// Membership tier exposed via GraphQL
pub struct MemberType {
    inner: DbMemberType,
}

impl MemberType {
    pub fn new(member_type: DbMemberType) -> Self {
        Self { inner: member_type }
    }
}

impl From<DbMemberType> for MemberType {
    fn from(member_type: DbMemberType) -> Self {
        Self::new(member_type)
    }
}

#[Object]
impl MemberType {
    /// Tier identifier
    async fn id(&self) -> MemberTypeId {
        self.inner.id
    }

    /// Discount percentage for this tier
    async fn discount(&self) -> f64 {
        self.inner.discount
    }

    /// Monthly post quota for this tier
    async fn posts_limit_per_month(&self) -> i32 {
        self.inner.posts_limit_per_month
    }

    /// Profiles on this tier (batched per request)
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let loader = ctx.data::<DataLoader<ProfilesByMemberTypeLoader>>()?;
        let profiles = loader.load_one(self.inner.id).await?;
        Ok(profiles
            .unwrap_or_default()
            .into_iter()
            .map(Profile::from)
            .collect())
    }
}
