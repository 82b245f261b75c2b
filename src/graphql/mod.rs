//! GraphQL schema and resolvers for Pulse
//!
//! This module contains the async-graphql schema including:
//! - The request-scoped batching dataloader primitive
//! - Per-kind loaders and the per-request loader registry
//! - Query and mutation resolvers for users, profiles, posts, member types
//! - Type definitions for all GraphQL objects

pub mod dataloader;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use schema::{build_schema, PulseSchema};
