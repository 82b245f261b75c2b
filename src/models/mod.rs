//! Database models for the Pulse API

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{CreatePost, Post, UpdatePost};
pub use profile::{CreateProfile, Profile, UpdateProfile};
pub use subscription::Subscription;
pub use user::{CreateUser, UpdateUser, User};
