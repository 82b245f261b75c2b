//! Profile repository for centralized database operations

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::PROFILE_COLUMNS;
use crate::models::{CreateProfile, Profile, UpdateProfile};

/// Repository for profile database operations
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new ProfileRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by its unique ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find all profiles
    pub async fn find_all(&self) -> Result<Vec<Profile>, sqlx::Error> {
        let sql = format!("SELECT {} FROM profiles", PROFILE_COLUMNS);
        sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    /// Create a profile for a user
    ///
    /// Fails with a database constraint error when the user already has a
    /// profile or the referenced user/member type does not exist.
    pub async fn create(&self, input: CreateProfile) -> Result<Profile, sqlx::Error> {
        let sql = format!(
            "INSERT INTO profiles (is_male, year_of_birth, user_id, member_type_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.user_id)
            .bind(input.member_type_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Update a profile; returns None when no such profile exists
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let sql = format!(
            "UPDATE profiles SET is_male = COALESCE($2, is_male), \
             year_of_birth = COALESCE($3, year_of_birth), \
             member_type_id = COALESCE($4, member_type_id) \
             WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.member_type_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a profile; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
