//! # witu-error
//!
//! Unified error handling for witu.
//!
//! - **ErrorKind**: what went wrong (e.g. UpstreamFetchFailed, SinkFailed)
//! - **ErrorStatus**: whether the caller may try again (Permanent, Temporary, Persistent)
//! - **Error Context**: key/value pairs that help locate the cause
//! - **Error Source**: the wrapped underlying error, never leaked as a raw type
//!
//! ## Usage
//!
//! ```rust
//! use witu_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::UpstreamFetchFailed, "service unavailable")
//!         .with_operation("source::fetch")
//!         .with_context("root", "Account.Name")
//!         .with_context("max_rank", "3"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, witu_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, later layers only append context
//! - Nothing retries automatically; the status is advisory

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the witu Error
pub type Result<T> = std::result::Result<T, Error>;
