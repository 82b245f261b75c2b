//! Profile mutations for the Pulse GraphQL API

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use super::to_graphql_error;
use crate::error::ApiError;
use crate::graphql::types::Profile;
use crate::models::{CreateProfile, MemberTypeId, UpdateProfile};
use crate::repositories::ProfileRepository;

/// Input for creating a profile
#[derive(Debug, Clone, InputObject)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Input for updating a profile; omitted fields are left unchanged
#[derive(Debug, Clone, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

/// Profile-related mutations
#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    /// Create a profile for a user
    async fn create_profile(&self, ctx: &Context<'_>, dto: CreateProfileInput) -> Result<Profile> {
        let repo = ctx.data::<ProfileRepository>()?;
        let profile = repo
            .create(CreateProfile {
                is_male: dto.is_male,
                year_of_birth: dto.year_of_birth,
                user_id: dto.user_id,
                member_type_id: dto.member_type_id,
            })
            .await?;
        Ok(Profile::from(profile))
    }

    /// Update an existing profile
    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let repo = ctx.data::<ProfileRepository>()?;
        let updated = repo
            .update(
                id,
                UpdateProfile {
                    is_male: dto.is_male,
                    year_of_birth: dto.year_of_birth,
                    member_type_id: dto.member_type_id,
                },
            )
            .await?;
        updated.map(Profile::from).ok_or_else(|| {
            to_graphql_error(ApiError::NotFound {
                resource_type: "profile",
                id: id.to_string(),
            })
        })
    }

    /// Delete a profile; returns whether a profile was removed
    async fn delete_profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let repo = ctx.data::<ProfileRepository>()?;
        Ok(repo.delete(id).await?)
    }
}
