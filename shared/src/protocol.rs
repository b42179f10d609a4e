pub mod error;
pub mod functions;
pub mod messages;

pub use error::ProtocolError;
