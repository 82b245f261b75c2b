//! Profile GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::dataloader::DataLoader;
use crate::graphql::loaders::{MemberTypeLoader, UserLoader};
use crate::models::{MemberTypeId, Profile as DbProfile};

use super::member_type::MemberType;
use super::user::User;

/// User profile exposed via GraphQL
pub struct Profile {
    inner: DbProfile,
}

impl Profile {
    pub fn new(profile: DbProfile) -> Self {
        Self { inner: profile }
    }
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self::new(profile)
    }
}

#[Object]
impl Profile {
    /// Unique profile identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Self-reported gender flag
    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    /// Year of birth
    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    /// Id of the owning user
    async fn user_id(&self) -> Uuid {
        self.inner.user_id
    }

    /// Id of this profile's membership tier
    async fn member_type_id(&self) -> MemberTypeId {
        self.inner.member_type_id
    }

    // Relationship resolvers

    /// Owning user (batched per request)
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let user = loader.load_one(self.inner.user_id).await?;
        Ok(user.map(User::from))
    }

    /// Membership tier (batched per request)
    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let loader = ctx.data::<DataLoader<MemberTypeLoader>>()?;
        let member_type = loader.load_one(self.inner.member_type_id).await?;
        Ok(member_type.map(MemberType::from))
    }
}
