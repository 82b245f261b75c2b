//! Root query object for the Pulse GraphQL API

mod member_type;
mod post;
mod profile;
mod user;

use async_graphql::MergedObject;

pub use member_type::MemberTypeQuery;
pub use post::PostQuery;
pub use profile::ProfileQuery;
pub use user::UserQuery;

/// Root query type merging all entity queries
#[derive(MergedObject, Default)]
pub struct Query(UserQuery, ProfileQuery, PostQuery, MemberTypeQuery);
