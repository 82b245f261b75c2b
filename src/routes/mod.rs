//! HTTP route handlers outside the GraphQL surface

pub mod health;

pub use health::{health_router, HealthState};
