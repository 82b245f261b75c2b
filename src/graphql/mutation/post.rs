//! Post mutations for the Pulse GraphQL API

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use super::to_graphql_error;
use crate::error::ApiError;
use crate::graphql::types::Post;
use crate::models::{CreatePost, UpdatePost};
use crate::repositories::PostRepository;

/// Input for creating a post
#[derive(Debug, Clone, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Input for updating a post; omitted fields are left unchanged
#[derive(Debug, Clone, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Post-related mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a new post
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        let repo = ctx.data::<PostRepository>()?;
        let post = repo
            .create(CreatePost {
                title: dto.title,
                content: dto.content,
                author_id: dto.author_id,
            })
            .await?;
        Ok(Post::from(post))
    }

    /// Update an existing post
    async fn change_post(&self, ctx: &Context<'_>, id: Uuid, dto: ChangePostInput) -> Result<Post> {
        let repo = ctx.data::<PostRepository>()?;
        let updated = repo
            .update(
                id,
                UpdatePost {
                    title: dto.title,
                    content: dto.content,
                },
            )
            .await?;
        updated.map(Post::from).ok_or_else(|| {
            to_graphql_error(ApiError::NotFound {
                resource_type: "post",
                id: id.to_string(),
            })
        })
    }

    /// Delete a post; returns whether a post was removed
    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let repo = ctx.data::<PostRepository>()?;
        Ok(repo.delete(id).await?)
    }
}
