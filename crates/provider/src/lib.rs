//! HTTP clients for the music provider and the file host.
//!
//! Provides the job launcher, the one-shot status read, the poll-until-done
//! loop, the re-hosting uploader and cover callback decoding. Every upstream
//! body is decoded leniently: fields may be absent or of the wrong type.

pub mod callback;
pub mod error;
pub mod extract;
pub mod music;
pub mod poll;
pub mod upload;

pub use error::UpstreamError;
pub use music::MusicApi;
pub use poll::{poll_until_done, JobStatus, PollError, PollTimeout, PolledJob, StatusSource};
pub use upload::{FileHostApi, UploadOutcome, UploadResult};
