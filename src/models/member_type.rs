//! Member type model
//!
//! Member types are a small fixed catalog (`BASIC`, `BUSINESS`) referenced by
//! profiles. The id is a closed enum rather than a free-form string so that
//! loader keys and mutation inputs are validated at the type level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{FromRow, Postgres};
use thiserror::Error;

/// Identifier of a member type tier. Stored as TEXT in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, async_graphql::Enum,
)]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    /// Database representation of the identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "BASIC",
            MemberTypeId::Business => "BUSINESS",
        }
    }
}

impl fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a database value does not name a known member type
#[derive(Debug, Error)]
#[error("unknown member type id: {0}")]
pub struct ParseMemberTypeIdError(String);

impl FromStr for MemberTypeId {
    type Err = ParseMemberTypeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(MemberTypeId::Basic),
            "BUSINESS" => Ok(MemberTypeId::Business),
            other => Err(ParseMemberTypeIdError(other.to_string())),
        }
    }
}

// The column is plain TEXT, so the sqlx mapping delegates to the string
// implementations instead of declaring a custom Postgres enum type.

impl sqlx::Type<Postgres> for MemberTypeId {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for MemberTypeId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for MemberTypeId {
    fn encode_by_ref(
        &self,
        buf: &mut PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Member type record from the member_types table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberType {
    /// Tier identifier (`BASIC` or `BUSINESS`)
    pub id: MemberTypeId,

    /// Discount percentage applied to members of this tier
    pub discount: f64,

    /// Monthly post quota for this tier
    pub posts_limit_per_month: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_member_type_id_round_trip() {
        for id in [MemberTypeId::Basic, MemberTypeId::Business] {
            assert_eq!(id.as_str().parse::<MemberTypeId>().unwrap(), id);
        }
    }

    #[test]
    fn test_member_type_id_rejects_unknown() {
        assert_matches!("PREMIUM".parse::<MemberTypeId>(), Err(_));
        assert_matches!("basic".parse::<MemberTypeId>(), Err(_));
    }

    #[test]
    fn test_member_type_id_display_matches_db_repr() {
        assert_eq!(MemberTypeId::Basic.to_string(), "BASIC");
        assert_eq!(MemberTypeId::Business.to_string(), "BUSINESS");
    }
}
