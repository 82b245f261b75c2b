//! User queries for the Pulse GraphQL API

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::dataloader::DataLoader;
use crate::graphql::loaders::UserLoader;
use crate::graphql::types::User;
use crate::repositories::UserRepository;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get a user by ID
    ///
    /// Goes through the user loader so that a top-level lookup and any
    /// nested edge pointing at the same user share one fetch.
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let user = loader.load_one(id).await?;
        Ok(user.map(User::from))
    }

    /// List all users
    ///
    /// Primes the user loader with every fetched row, so per-row relation
    /// fields resolved afterwards (subscriptions, post authors) are served
    /// from cache instead of refetching users one batch later.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let repo = ctx.data::<UserRepository>()?;
        let loader = ctx.data::<DataLoader<UserLoader>>()?;

        let users = repo.find_all().await?;
        for user in &users {
            loader.prime(user.id, user.clone());
        }
        Ok(users.into_iter().map(User::from).collect())
    }
}
