//! Error kinds for witu operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to decide how to surface a failure: fetch
/// failures clear the model, sink failures only raise a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested operation is not supported for this input
    Unsupported,

    /// Invalid configuration or command-line options
    ConfigInvalid,

    /// Invalid argument passed to a function
    InvalidArgument,

    // =========================================================================
    // Upstream errors
    // =========================================================================
    /// The dependency-discovery service call failed
    UpstreamFetchFailed,

    /// The dependency-discovery service did not answer in time
    Timeout,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// A node id does not resolve in the current graph
    NodeNotFound,

    // =========================================================================
    // Sink errors
    // =========================================================================
    /// The environment refused a clipboard or file write
    SinkFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    /// Directory traversal failed
    TraversalFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed (payload is not graph-shaped)
    DeserializationFailed,

    /// Invalid format
    InvalidFormat,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::UpstreamFetchFailed | ErrorKind::IoFailed
        )
    }
}
