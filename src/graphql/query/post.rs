//! Post queries for the Pulse GraphQL API

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::types::Post;
use crate::repositories::PostRepository;

/// Post-related queries
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Post>> {
        let repo = ctx.data::<PostRepository>()?;
        let post = repo.find_by_id(id).await?;
        Ok(post.map(Post::from))
    }

    /// List all posts
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let repo = ctx.data::<PostRepository>()?;
        let posts = repo.find_all().await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }
}
