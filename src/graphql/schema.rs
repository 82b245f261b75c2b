//! GraphQL schema builder for Pulse
//!
//! Repositories are schema data (stateless over the pool, safe to share
//! across requests). Loaders are NOT schema data: they carry per-request
//! caches and are attached to each request by `loaders::register`.

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use super::mutation::Mutation;
use super::query::Query;
use crate::repositories::{
    MemberTypeRepository, PostRepository, ProfileRepository, SubscriptionRepository,
    UserRepository,
};

/// Maximum GraphQL query depth accepted before execution
pub const MAX_QUERY_DEPTH: usize = 5;

/// The Pulse GraphQL schema type
pub type PulseSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with all shared services attached
pub fn build_schema(pool: PgPool) -> PulseSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .limit_depth(MAX_QUERY_DEPTH)
        .data(UserRepository::new(pool.clone()))
        .data(ProfileRepository::new(pool.clone()))
        .data(PostRepository::new(pool.clone()))
        .data(MemberTypeRepository::new(pool.clone()))
        .data(SubscriptionRepository::new(pool))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_exposes_loader_backed_relations() {
        // SDL generation needs no database; it proves the resolver graph
        // is wired (field names, enum values) without executing anything.
        let pool_less = Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .limit_depth(MAX_QUERY_DEPTH)
            .finish();
        let sdl = pool_less.sdl();

        for field in [
            "userSubscribedTo",
            "subscribedToUser",
            "memberType",
            "postsLimitPerMonth",
            "BUSINESS",
            "subscribeTo",
            "unsubscribeFrom",
        ] {
            assert!(sdl.contains(field), "SDL is missing {field}:\n{sdl}");
        }
    }
}
