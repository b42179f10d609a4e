use thiserror::Error;

use glrelay_shared::{DecodeError, EncodeError, ProtocolError, ValueKind, WireError};

use crate::transport::SendError;

/// Errors surfaced at the proxy's library seams
///
/// GL entry points never return these: degraded results there are logged and
/// replaced by defaults. These come from dynamic dispatch through the
/// function table, envelope encoding and the transport plumbing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// Wire error
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    /// Encode error
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Decode error
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Protocol error
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A dynamically supplied argument had the wrong kind
    #[error("Argument {index} of '{function}' should be {expected}, found {found}")]
    BadArgument {
        function: &'static str,
        index: usize,
        expected: &'static str,
        found: ValueKind,
    },

    /// Too few arguments supplied to a dynamic call
    #[error("'{function}' expects an argument at position {index}, but none was supplied")]
    MissingArgument {
        function: &'static str,
        index: usize,
    },

    /// Name not present in the function table or the remote function list
    #[error("Unknown function '{name}'")]
    UnknownFunction { name: String },

    /// The socket refused the message
    #[error("Send failed: {0}")]
    SendFailed(#[from] SendError),

    /// The bridge thread is no longer receiving events
    #[error("The bridge event loop has stopped. No further calls can be delivered")]
    BridgeClosed,
}
