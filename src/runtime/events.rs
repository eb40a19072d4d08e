//! Runtime event stream payloads.

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Events emitted from the console actor loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleEvent {
    /// A keystroke or token produced something other than a silent accept.
    Status {
        /// Outcome as reported to the caller.
        status: Status,
    },
    /// A record was committed to the finalized stack.
    Cached {
        /// Records now awaiting persistence.
        pending: usize,
    },
    /// The record being edited was removed from the stack.
    Deleted {
        /// Former stack index.
        index: usize,
    },
    /// Pending records were handed to the sink.
    Written {
        /// Number of records written.
        count: usize,
    },
    /// The sink rejected a record; it stays on the stack.
    WriteFailed {
        /// Sink error text.
        message: String,
    },
}
