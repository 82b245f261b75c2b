//! Subscription repository for the user-follows-user junction table

use sqlx::PgPool;
use uuid::Uuid;

/// Repository for subscription junction writes
#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new SubscriptionRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Link a subscriber to an author
    ///
    /// Subscribing twice to the same author is a no-op rather than a
    /// constraint violation.
    pub async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO subscribers_on_authors (subscriber_id, author_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove the link between a subscriber and an author; returns whether a
    /// row was removed
    pub async fn unsubscribe(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM subscribers_on_authors WHERE subscriber_id = $1 AND author_id = $2",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
