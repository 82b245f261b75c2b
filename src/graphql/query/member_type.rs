//! Member type queries for the Pulse GraphQL API

use async_graphql::{Context, Object, Result};

use crate::graphql::types::MemberType;
use crate::models::MemberTypeId;
use crate::repositories::MemberTypeRepository;

/// Member-type-related queries
#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    /// Get a member type by tier identifier
    async fn member_type(
        &self,
        ctx: &Context<'_>,
        id: MemberTypeId,
    ) -> Result<Option<MemberType>> {
        let repo = ctx.data::<MemberTypeRepository>()?;
        let member_type = repo.find_by_id(id).await?;
        Ok(member_type.map(MemberType::from))
    }

    /// List all member types
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberType>> {
        let repo = ctx.data::<MemberTypeRepository>()?;
        let member_types = repo.find_all().await?;
        Ok(member_types.into_iter().map(MemberType::from).collect())
    }
}
