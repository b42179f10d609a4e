use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while encoding a call onto the binary channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value kind has no wire representation
    #[error("Argument {index} has kind '{kind}', which cannot be sent as a call argument")]
    UnsupportedKind { index: usize, kind: ValueKind },

    /// A string or blob does not fit the u32 length prefix
    #[error("Argument {index} is {len} bytes long, exceeding the u32 length prefix")]
    PayloadTooLarge { index: usize, len: usize },

    /// More arguments than the u32 count field can describe
    #[error("Call has {count} arguments, exceeding the u32 argument count")]
    TooManyArguments { count: usize },
}

/// Errors that can occur while decoding a call received on the binary channel
///
/// SECURITY: decoding processes data from the network; every malformed input
/// maps to one of these instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ended in the middle of a field
    #[error("Unexpected end of call data at offset {offset}: needed {needed} more bytes")]
    UnexpectedEnd { offset: usize, needed: usize },

    /// Function index outside the known function list
    #[error("Function index {index} is not in the function list")]
    UnknownFunction { index: u8 },

    /// Value tag that does not name a wire kind
    #[error("Unknown value tag {tag:#04x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    /// String payload is not valid UTF-8
    #[error("String argument at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// Trailer did not match the sentinel
    #[error("Call sentinel mismatch: found {found:#010x}. The stream is out of sync")]
    BadSentinel { found: u32 },

    /// Bytes left over after the sentinel
    #[error("{count} trailing bytes after the call sentinel")]
    TrailingBytes { count: usize },
}

/// Errors that can occur while reassembling fragmented binary messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReassemblyError {
    /// Fragment larger than the agreed chunk size
    #[error("Fragment of {len} bytes exceeds the chunk size of {chunk_size} bytes")]
    OversizedFragment { len: usize, chunk_size: usize },
}

/// General wire-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Encode error
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Decode error
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Reassembly error
    #[error("Reassembly error: {0}")]
    Reassembly(#[from] ReassemblyError),
}
