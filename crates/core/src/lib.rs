//! Domain logic for the songbridge proxy.
//!
//! Everything here is pure: request types, the two validation schemas,
//! poll-budget clamping, re-hosting helpers and the response normalizer.
//! HTTP clients live in `songbridge-provider`, the server in `songbridge-api`.

pub mod attribution;
pub mod error;
pub mod polling;
pub mod rehost;
pub mod types;
pub mod validation;
