//! GraphQL object types
//!
//! Thin wrappers over the database models; every relationship field goes
//! through the loader layer, never straight to the pool.

pub mod member_type;
pub mod post;
pub mod profile;
pub mod user;

pub use member_type::MemberType;
pub use post::Post;
pub use profile::Profile;
pub use user::User;
