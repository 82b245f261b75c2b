//! Profile queries for the Pulse GraphQL API

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::types::Profile;
use crate::repositories::ProfileRepository;

/// Profile-related queries
#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// Get a profile by ID
    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let repo = ctx.data::<ProfileRepository>()?;
        let profile = repo.find_by_id(id).await?;
        Ok(profile.map(Profile::from))
    }

    /// List all profiles
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let repo = ctx.data::<ProfileRepository>()?;
        let profiles = repo.find_all().await?;
        Ok(profiles.into_iter().map(Profile::from).collect())
    }
}
