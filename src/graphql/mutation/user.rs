//! User mutations for the Pulse GraphQL API
//!
//! - createUser / changeUser / deleteUser
//! - subscribeTo / unsubscribeFrom for the subscription junction

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use super::to_graphql_error;
use crate::error::ApiError;
use crate::graphql::dataloader::DataLoader;
use crate::graphql::loaders::UserLoader;
use crate::graphql::types::User;
use crate::models::{CreateUser, UpdateUser};
use crate::repositories::{SubscriptionRepository, UserRepository};

/// Input for creating a user
#[derive(Debug, Clone, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

/// Input for updating a user; omitted fields are left unchanged
#[derive(Debug, Clone, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

/// User-related mutations
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a new user
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        let repo = ctx.data::<UserRepository>()?;
        let user = repo
            .create(CreateUser {
                name: dto.name,
                balance: dto.balance,
            })
            .await?;
        Ok(User::from(user))
    }

    /// Update an existing user
    async fn change_user(&self, ctx: &Context<'_>, id: Uuid, dto: ChangeUserInput) -> Result<User> {
        let repo = ctx.data::<UserRepository>()?;
        let updated = repo
            .update(
                id,
                UpdateUser {
                    name: dto.name,
                    balance: dto.balance,
                },
            )
            .await?;
        updated.map(User::from).ok_or_else(|| {
            to_graphql_error(ApiError::NotFound {
                resource_type: "user",
                id: id.to_string(),
            })
        })
    }

    /// Delete a user; returns whether a user was removed
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let repo = ctx.data::<UserRepository>()?;
        Ok(repo.delete(id).await?)
    }

    /// Subscribe a user to an author; returns the subscribing user
    async fn subscribe_to(&self, ctx: &Context<'_>, user_id: Uuid, author_id: Uuid) -> Result<User> {
        if user_id == author_id {
            return Err(to_graphql_error(ApiError::Validation(
                "a user cannot subscribe to themselves".to_string(),
            )));
        }

        let subscriptions = ctx.data::<SubscriptionRepository>()?;
        subscriptions.subscribe(user_id, author_id).await?;

        let users = ctx.data::<DataLoader<UserLoader>>()?;
        let user = users.load_one(user_id).await?;
        user.map(User::from).ok_or_else(|| {
            to_graphql_error(ApiError::NotFound {
                resource_type: "user",
                id: user_id.to_string(),
            })
        })
    }

    /// Remove a subscription; returns whether a link was removed
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let subscriptions = ctx.data::<SubscriptionRepository>()?;
        Ok(subscriptions.unsubscribe(user_id, author_id).await?)
    }
}
