//! Outcome of a character, token or lifecycle operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result reported back to the input loop.
///
/// `Display` yields the console string: empty for `Accepted`, a backspace
/// for `Deleted`, `Warning: ...`/`Error: ...` for problems and the bare
/// message for `Info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Silently accepted.
    Accepted,
    /// One pending character was erased.
    Deleted,
    /// Informational message.
    Info(String),
    /// Value kept, but suspect.
    Warning(String),
    /// Token rejected; the record is unchanged.
    Error(String),
}

impl Status {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Accepted => Ok(()),
            Status::Deleted => f.write_str("\u{8}"),
            Status::Info(msg) => f.write_str(msg),
            Status::Warning(msg) => write!(f, "Warning: {msg}"),
            Status::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}
