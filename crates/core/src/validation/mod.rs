//! Request validation.
//!
//! Each schema is an ordered list of named predicate rules over a trimmed
//! draft of the client input. Rules never panic and never touch I/O.

pub mod cover;
pub mod generation;
pub mod rules;
pub mod upload;

pub use cover::validate_cover;
pub use generation::validate_generation;
pub use rules::{Rule, Violation};
pub use upload::validate_upload;
