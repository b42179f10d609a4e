//! A proxied GL context: the entry points, the local state they keep in sync
//! and the plumbing that turns them into envelopes.

macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$(::glrelay_shared::Value::from($value)),*]
    };
}

mod functions;
mod state;

pub use state::{BindingSlot, ContextState, VertexAttrib, VertexSource};

use std::{any::type_name, sync::Arc, time::Instant};

use log::{debug, warn};

use glrelay_shared::{
    vertex_buffer_size, ContextId, FromValue, GLenum, GLint, GLsizei, SurfaceId, Value,
};

use crate::{
    envelope::Envelope,
    error::ProxyError,
    function_table::{Args, Trampoline},
    registry::Registry,
};

/// Name, size and type of an active attribute or uniform
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveInfo {
    pub size: GLint,
    pub type_: GLenum,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderPrecision {
    pub range_min: GLint,
    pub range_max: GLint,
    pub precision: GLint,
}

/// The last argument of `vertex_attrib_pointer`: an offset into the bound
/// array buffer, or client memory when no array buffer is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexPointer<'a> {
    Offset(u32),
    Client(&'a [u8]),
}

/// The index argument of `draw_elements`: an offset into the bound element
/// array buffer, or client memory when none is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource<'a> {
    Offset(u32),
    Client(&'a [u8]),
}

/// One logical rendering context on a remote canvas.
///
/// The caller owns the context. It targets at most one surface at a time and
/// never owns it.
pub struct Context {
    id: ContextId,
    registry: Arc<Registry>,
    surface: Option<SurfaceId>,
    state: ContextState,
}

impl Context {
    pub fn new(registry: Arc<Registry>) -> Self {
        let id = registry.next_context_id();
        debug!("Creating context {}", id);
        Self {
            id,
            registry,
            surface: None,
            state: ContextState::new(),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    pub fn state(&self) -> &ContextState {
        &self.state
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Target `surface` from now on. The first time, this waits for the
    /// renderer's default context parameters for that surface. Returns false
    /// if the surface's client is not connected or goes away while waiting.
    pub fn make_current(&mut self, surface: SurfaceId) -> bool {
        debug!("Context {} made current on surface {}", self.id, surface);
        self.surface = Some(surface);
        if !self.registry.is_surface_connected(surface) {
            return false;
        }

        if !self.state.has_snapshot() {
            let Some(defaults) = self.registry.wait_defaults(surface) else {
                return false;
            };
            self.state.load_snapshot(defaults);
        }

        let Some(geometry) = self.registry.surface_geometry(surface) else {
            return false;
        };
        self.post(
            "makeCurrent",
            args![self.id as i32, geometry.width, geometry.height, surface as i32],
        )
    }

    pub fn done_current(&mut self) {
        self.post("makeCurrent", args![0, 0, 0, 0]);
        self.surface = None;
    }

    /// Present the current frame, waiting a bounded time for the renderer to
    /// acknowledge it
    pub fn swap_buffers(&self) -> bool {
        let Some(envelope) = self.envelope("swapBuffers", true) else {
            return false;
        };
        let Some(id) = envelope.correlation_id else {
            return false;
        };

        let _swap = self.registry.swap_lock();
        if !self.registry.post(envelope) {
            return false;
        }
        let config = self.registry.config();
        let deadline = Instant::now() + config.swap_timeout;
        self.registry
            .ledger()
            .wait_until(id, deadline, config.poll_interval, || self.is_connected())
            .is_some()
    }

    /// Resolve a local entry point name such as `glClear`
    pub fn get_proc_address(&self, name: &str) -> Option<Trampoline> {
        self.registry
            .functions()
            .lookup(name)
            .and_then(|entry| entry.trampoline)
    }

    /// Call a local entry point by name with dynamically typed arguments
    pub fn invoke(&mut self, name: &str, arguments: Vec<Value>) -> Result<Value, ProxyError> {
        let entry = self
            .registry
            .functions()
            .lookup(name)
            .ok_or_else(|| ProxyError::UnknownFunction {
                name: name.to_string(),
            })?;
        let function = entry.local;
        let trampoline = entry
            .trampoline
            .ok_or_else(|| ProxyError::UnknownFunction {
                name: name.to_string(),
            })?;
        let mut args = Args::new(function, arguments);
        trampoline(self, &mut args)
    }

    // Envelope plumbing

    fn is_connected(&self) -> bool {
        self.surface
            .is_some_and(|surface| self.registry.is_surface_connected(surface))
    }

    /// Start an envelope for the current surface, or `None` when the call
    /// cannot be delivered. A waiting envelope gets its correlation id here.
    fn envelope(&self, function: &'static str, wait: bool) -> Option<Envelope> {
        let surface = self.surface?;
        if !self.registry.is_surface_connected(surface) {
            return None;
        }
        let correlation_id = wait.then(|| self.registry.ledger().issue());
        Some(Envelope::new(function, surface, correlation_id))
    }

    /// Fire and forget. Returns whether the call was handed to the bridge.
    fn post(&self, function: &'static str, arguments: Vec<Value>) -> bool {
        let Some(mut envelope) = self.envelope(function, false) else {
            return false;
        };
        envelope.extend(arguments);
        self.registry.post(envelope)
    }

    /// Post and block until the renderer answers, or the connection drops
    fn query(&self, function: &'static str, arguments: Vec<Value>) -> Option<Value> {
        let mut envelope = self.envelope(function, true)?;
        envelope.extend(arguments);
        let id = envelope.correlation_id?;
        if !self.registry.post(envelope) {
            return None;
        }
        self.registry.ledger().wait(
            id,
            self.registry.config().poll_interval,
            || self.is_connected(),
        )
    }

    /// `query`, converted to `T`. Disconnection, a null answer or a kind
    /// mismatch all produce `default`.
    fn query_as<T: FromValue>(
        &self,
        function: &'static str,
        default: T,
        arguments: Vec<Value>,
    ) -> T {
        match self.query(function, arguments) {
            None | Some(Value::Null) => default,
            Some(value) => convert_or(&value, default),
        }
    }

    /// The first `len` bytes of caller memory
    fn client_bytes(&self, function: &str, data: &[u8], len: usize) -> Vec<u8> {
        if data.len() < len {
            warn!(
                "{}: expected {} bytes of client data, got {}",
                function,
                len,
                data.len()
            );
            return data.to_vec();
        }
        data[..len].to_vec()
    }

    /// Append the enabled client-side vertex attributes a draw of `count`
    /// vertices reads
    fn push_client_attribs(&self, envelope: &mut Envelope, count: GLsizei) {
        let function = envelope.function;
        let attribs = self.state.client_attribs().collect::<Vec<_>>();
        envelope.push(attribs.len() as i32);
        for (index, attrib) in attribs {
            let len = vertex_buffer_size(count, attrib.size, attrib.type_, attrib.stride);
            let data = attrib.client_data().unwrap_or_default();
            envelope.extend(args![
                index,
                attrib.size,
                attrib.type_ as i32,
                i32::from(attrib.normalized),
                attrib.stride,
                self.client_bytes(function, data, len),
            ]);
        }
    }
}

/// Convert `value`, logging and substituting `default` on a kind mismatch
fn convert_or<T: FromValue>(value: &Value, default: T) -> T {
    match value.get::<T>() {
        Some(converted) => converted,
        None => {
            warn!("Cannot convert {} to {}", value.kind(), type_name::<T>());
            default
        }
    }
}
