//! Advisory retry status attached to every error.

use std::fmt;

use crate::ErrorKind;

/// Whether a failed operation could succeed if the user triggers it again.
///
/// Nothing in witu retries on its own. The host uses the status to decide
/// between offering a "try again" action and showing a terminal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Repeating the action with the same input fails the same way.
    #[default]
    Permanent,

    /// The failure came from the environment (network, disk) and may clear.
    Temporary,

    /// Was temporary, but the user already tried again and it failed again.
    Persistent,
}

impl ErrorStatus {
    /// Default status for a freshly created error of `kind`.
    pub fn for_kind(kind: ErrorKind) -> Self {
        if kind.is_retryable() {
            ErrorStatus::Temporary
        } else {
            ErrorStatus::Permanent
        }
    }

    /// True when offering a retry makes sense.
    pub fn is_retryable(&self) -> bool {
        *self == ErrorStatus::Temporary
    }

    /// Record that a retry was attempted and failed.
    pub fn persist(self) -> Self {
        if self == ErrorStatus::Temporary {
            ErrorStatus::Persistent
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Permanent => "permanent",
            ErrorStatus::Temporary => "temporary",
            ErrorStatus::Persistent => "persistent",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
