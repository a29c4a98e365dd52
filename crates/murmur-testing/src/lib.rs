//! Test utilities for Murmur services.
//!
//! Provides `MockSession` and the contract fixture loader.
//! Import from dev-dependencies only.

pub mod auth;
pub mod fixture;
