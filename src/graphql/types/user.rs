//! User GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::dataloader::DataLoader;
use crate::graphql::loaders::{
    FollowersLoader, FollowingLoader, PostsByAuthorLoader, ProfileByUserLoader, UserLoader,
};
use crate::models::User as DbUser;

use super::post::Post;
use super::profile::Profile;

/// User account exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Account balance
    async fn balance(&self) -> f64 {
        self.inner.balance
    }

    // Relationship resolvers

    /// This user's profile, if one exists (batched per request)
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let loader = ctx.data::<DataLoader<ProfileByUserLoader>>()?;
        let profile = loader.load_one(self.inner.id).await?;
        Ok(profile.map(Profile::from))
    }

    /// Posts written by this user (batched per request)
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let loader = ctx.data::<DataLoader<PostsByAuthorLoader>>()?;
        let posts = loader.load_one(self.inner.id).await?;
        Ok(posts.unwrap_or_default().into_iter().map(Post::from).collect())
    }

    /// Accounts this user is subscribed to
    ///
    /// Resolved in two batched hops: the junction loader yields followed
    /// author ids, then the user loader materializes them. Both hops batch
    /// across every user in the current resolution layer.
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let following = ctx.data::<DataLoader<FollowingLoader>>()?;
        let users = ctx.data::<DataLoader<UserLoader>>()?;

        let author_ids = following.load_one(self.inner.id).await?.unwrap_or_default();
        let authors = users.load_many(author_ids).await?;
        Ok(authors.into_iter().flatten().map(User::from).collect())
    }

    /// Accounts subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let followers = ctx.data::<DataLoader<FollowersLoader>>()?;
        let users = ctx.data::<DataLoader<UserLoader>>()?;

        let subscriber_ids = followers.load_one(self.inner.id).await?.unwrap_or_default();
        let subscribers = users.load_many(subscriber_ids).await?;
        Ok(subscribers.into_iter().flatten().map(User::from).collect())
    }
}
