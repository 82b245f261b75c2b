//! Member type repository for centralized database operations
//!
//! Member types are a fixed catalog seeded by migrations; only reads exist.

use sqlx::PgPool;

use super::utils::MEMBER_TYPE_COLUMNS;
use crate::models::{MemberType, MemberTypeId};

/// Repository for member type database operations
#[derive(Clone)]
pub struct MemberTypeRepository {
    pool: PgPool,
}

impl MemberTypeRepository {
    /// Create a new MemberTypeRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a member type by its tier identifier
    pub async fn find_by_id(&self, id: MemberTypeId) -> Result<Option<MemberType>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = $1",
            MEMBER_TYPE_COLUMNS
        );
        sqlx::query_as::<_, MemberType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find all member types
    pub async fn find_all(&self) -> Result<Vec<MemberType>, sqlx::Error> {
        let sql = format!("SELECT {} FROM member_types ORDER BY id ASC", MEMBER_TYPE_COLUMNS);
        sqlx::query_as::<_, MemberType>(&sql)
            .fetch_all(&self.pool)
            .await
    }
}
