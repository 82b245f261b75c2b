//! Pulse API library
//!
//! This crate exposes the core API components for use in integration tests
//! and by the server binary.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use graphql::{build_schema, PulseSchema};
