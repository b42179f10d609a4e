//! # glrelay Server
//! Host-side proxy for a GL ES 2.0 style API. Calls made on a [`Context`]
//! are tracked against a local state cache, encoded, and forwarded over a
//! persistent connection to a remote canvas renderer. Calls that return data
//! block the caller until the renderer answers or the connection drops.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use glrelay_shared::{
        decode_call, fragment, gl, image_size, ClientMessage, DecodedCall, FromValue, GLenum,
        GLint, GLsizei, GLuint, InputKind, Reassembler, ScreenInfo, ServerMessage, SurfaceId,
        Value, ValueKind, MAX_CHUNK_SIZE, REMOTE_FUNCTIONS,
    };
}

mod bridge;
mod client;
mod config;
mod context;
mod envelope;
mod error;
mod events;
mod function_table;
mod ledger;
mod registry;

pub use bridge::{Bridge, Poster};
pub use client::{ClientKey, SurfaceGeometry};
pub use config::ProxyConfig;
pub use context::{
    ActiveInfo, BindingSlot, Context, ContextState, IndexSource, ShaderPrecision, VertexAttrib,
    VertexPointer, VertexSource,
};
pub use envelope::Envelope;
pub use error::ProxyError;
pub use events::ProxyEvent;
pub use function_table::{Args, FunctionEntry, FunctionTable, Trampoline};
pub use ledger::Ledger;
pub use registry::Registry;
