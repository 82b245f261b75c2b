//! Subscription junction model
//!
//! A row links a subscriber to an author in the self-referential
//! many-to-many relation between users. The two columns are never
//! interchangeable: which one a query filters on decides the direction
//! of the relation being traversed.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Row from the subscribers_on_authors junction table
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct Subscription {
    /// The user who follows
    pub subscriber_id: Uuid,

    /// The user being followed
    pub author_id: Uuid,
}
