use thiserror::Error;

cfg_if! {
    if #[cfg(feature = "transport_local")] {
        pub mod local;
    } else {}
}

/// The socket refused a message, almost always because it has closed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Socket is not connected. The message was dropped")]
pub struct SendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    Connected,
    Closed,
}

/// Host-side end of one renderer connection.
///
/// Only the bridge thread writes through it; caller threads read `state` to
/// decide whether a call can be delivered.
pub trait MessageSender: Send + Sync {
    /// Sends one binary fragment
    fn send_binary(&self, payload: &[u8]) -> Result<(), SendError>;
    /// Sends one JSON control message
    fn send_text(&self, text: &str) -> Result<(), SendError>;
    fn state(&self) -> SocketState;
}
