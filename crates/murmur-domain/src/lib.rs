//! Domain rules shared across Murmur services.
//!
//! This crate contains only pure types and checks with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/`.

pub mod account;
pub mod message;
