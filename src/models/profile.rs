//! Profile model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::member_type::MemberTypeId;

/// Profile record from the profiles table
///
/// Each user has at most one profile (`user_id` is unique).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    /// Unique profile identifier
    pub id: Uuid,

    /// Self-reported gender flag
    pub is_male: bool,

    /// Year of birth
    pub year_of_birth: i32,

    /// Owning user
    pub user_id: Uuid,

    /// Membership tier of this profile
    pub member_type_id: MemberTypeId,
}

/// Profile creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Partial profile update; unset fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}
