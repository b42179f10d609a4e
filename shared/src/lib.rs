//! # glrelay Shared
//! The wire protocol spoken between the glrelay host proxy and a remote
//! canvas renderer: tagged call values, the binary call framing, chunking,
//! the remote function list and the JSON control messages.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod gl;
pub mod protocol;
pub mod wire;

mod pixels;
mod types;
mod value;

pub use pixels::{element_size, image_size, vertex_buffer_size, vertex_size};
pub use protocol::{
    error::ProtocolError,
    functions::{
        function_at, function_index, remote_function, supported_functions, RemoteFunction,
        REMOTE_FUNCTIONS,
    },
    messages::{ClientMessage, InputKind, ScreenInfo, ServerMessage, SysInfo},
};
pub use types::{
    ContextId, CorrelationId, FunctionIndex, GLbitfield, GLboolean, GLenum, GLfloat, GLint,
    GLsizei, GLuint, SurfaceId,
};
pub use value::{FromValue, Value, ValueKind};
pub use wire::{
    constants::{CALL_SENTINEL, MAX_CHUNK_SIZE},
    decoder::{decode_call, CallReader, DecodedCall},
    encoder::{encode_call, CallWriter},
    error::{DecodeError, EncodeError, ReassemblyError, WireError},
    fragmenter::{fragment, Fragmenter},
    reassembler::Reassembler,
};
