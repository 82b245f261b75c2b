//! Repository layer for database operations
//!
//! Repositories own the direct CRUD queries. Batched relationship reads live
//! in the GraphQL loader layer instead (`crate::graphql::loaders`).

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;
pub mod utils;

pub use member_type::MemberTypeRepository;
pub use post::PostRepository;
pub use profile::ProfileRepository;
pub use subscription::SubscriptionRepository;
pub use user::UserRepository;
