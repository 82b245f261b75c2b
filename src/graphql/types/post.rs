//! Post GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::dataloader::DataLoader;
use crate::graphql::loaders::UserLoader;
use crate::models::Post as DbPost;

use super::user::User;

/// Post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl Post {
    pub fn new(post: DbPost) -> Self {
        Self { inner: post }
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    /// Unique post identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Post title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// Post body
    async fn content(&self) -> &str {
        &self.inner.content
    }

    /// Id of the authoring user
    async fn author_id(&self) -> Uuid {
        self.inner.author_id
    }

    /// Authoring user (batched per request)
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let author = loader.load_one(self.inner.author_id).await?;
        Ok(author.map(User::from))
    }
}
