//! Cross-cutting HTTP plumbing shared by Murmur services.

pub mod config;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
