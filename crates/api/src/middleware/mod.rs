//! Request/response middleware.
//!
//! - [`attribution::attribute_response`] -- normalizes every JSON response body.
//! - [`preflight::options_no_content`] -- answers `OPTIONS` with 204.

pub mod attribution;
pub mod preflight;
