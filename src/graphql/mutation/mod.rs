//! Root mutation object for the Pulse GraphQL API
//!
//! Mutations are pass-through persistence calls; they do not read through
//! the loader layer (and must not: loader caches are never invalidated on
//! write, they simply die with the request).

mod post;
mod profile;
mod user;

use async_graphql::MergedObject;

use crate::error::ApiError;

pub use post::PostMutation;
pub use profile::ProfileMutation;
pub use user::UserMutation;

/// Root mutation type merging all entity mutations
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, ProfileMutation, PostMutation);

/// Convert API errors to GraphQL errors with appropriate messages
fn to_graphql_error(error: ApiError) -> async_graphql::Error {
    match &error {
        ApiError::NotFound { resource_type, id } => {
            async_graphql::Error::new(format!("{} not found: {}", resource_type, id))
        }
        ApiError::Validation(msg) => async_graphql::Error::new(msg.clone()),
        _ => {
            tracing::error!(error = %error, "mutation error");
            async_graphql::Error::new("An unexpected error occurred")
        }
    }
}
