//! Session types shared by Murmur services and their tests.
//!
//! Provides session-token signing/validation, cookie builders, and the `Session` extractor.

pub mod cookie;
pub mod session;
pub mod token;
