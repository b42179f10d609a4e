use std::collections::{BTreeMap, HashMap};

use glrelay_shared::{gl, GLenum, GLint, GLsizei, GLuint, Value};

/// Where a vertex attribute reads its data from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexSource {
    /// A server-side buffer, referenced by byte offset
    Buffer { buffer: GLuint, offset: u32 },
    /// Client memory, copied when the pointer was specified
    Client(Vec<u8>),
}

/// Format and source of one vertex attribute, as last specified
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexAttrib {
    pub size: GLint,
    pub type_: GLenum,
    pub normalized: bool,
    pub stride: GLsizei,
    pub enabled: bool,
    pub source: Option<VertexSource>,
}

impl VertexAttrib {
    /// Client-side data to embed in draw calls, if this attribute needs it
    pub fn client_data(&self) -> Option<&[u8]> {
        match &self.source {
            Some(VertexSource::Client(bytes)) if self.enabled => Some(bytes),
            _ => None,
        }
    }
}

/// Binding points tracked locally, each answering one `getIntegerv` name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingSlot {
    CurrentProgram,
    ArrayBuffer,
    ElementArrayBuffer,
    Texture2D,
    ActiveTexture,
    DrawFramebuffer,
    UnpackAlignment,
}

impl BindingSlot {
    /// The slot answering `pname`, if any
    pub fn for_parameter(pname: GLenum) -> Option<Self> {
        match pname {
            gl::CURRENT_PROGRAM => Some(BindingSlot::CurrentProgram),
            gl::ARRAY_BUFFER_BINDING => Some(BindingSlot::ArrayBuffer),
            gl::ELEMENT_ARRAY_BUFFER_BINDING => Some(BindingSlot::ElementArrayBuffer),
            gl::TEXTURE_BINDING_2D => Some(BindingSlot::Texture2D),
            gl::ACTIVE_TEXTURE => Some(BindingSlot::ActiveTexture),
            gl::FRAMEBUFFER_BINDING => Some(BindingSlot::DrawFramebuffer),
            gl::UNPACK_ALIGNMENT => Some(BindingSlot::UnpackAlignment),
            _ => None,
        }
    }
}

/// Remote state mirrored on the host side of one context
#[derive(Debug, Clone)]
pub struct ContextState {
    current_program: GLuint,
    bound_array_buffer: GLuint,
    bound_element_array_buffer: GLuint,
    bound_texture_2d: GLuint,
    active_texture_unit: GLenum,
    bound_draw_framebuffer: GLuint,
    unpack_alignment: GLuint,
    vertex_attribs: BTreeMap<GLuint, VertexAttrib>,
    cached_parameters: HashMap<GLenum, Value>,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            current_program: 0,
            bound_array_buffer: 0,
            bound_element_array_buffer: 0,
            bound_texture_2d: 0,
            active_texture_unit: gl::TEXTURE0,
            bound_draw_framebuffer: 0,
            unpack_alignment: 4,
            vertex_attribs: BTreeMap::new(),
            cached_parameters: HashMap::new(),
        }
    }
}

impl ContextState {
    pub fn new() -> Self {
        Self::default()
    }

    // Bindings

    pub fn record_binding(&mut self, slot: BindingSlot, value: GLuint) {
        let field = match slot {
            BindingSlot::CurrentProgram => &mut self.current_program,
            BindingSlot::ArrayBuffer => &mut self.bound_array_buffer,
            BindingSlot::ElementArrayBuffer => &mut self.bound_element_array_buffer,
            BindingSlot::Texture2D => &mut self.bound_texture_2d,
            BindingSlot::ActiveTexture => &mut self.active_texture_unit,
            BindingSlot::DrawFramebuffer => &mut self.bound_draw_framebuffer,
            BindingSlot::UnpackAlignment => &mut self.unpack_alignment,
        };
        *field = value;
    }

    pub fn binding(&self, slot: BindingSlot) -> GLuint {
        match slot {
            BindingSlot::CurrentProgram => self.current_program,
            BindingSlot::ArrayBuffer => self.bound_array_buffer,
            BindingSlot::ElementArrayBuffer => self.bound_element_array_buffer,
            BindingSlot::Texture2D => self.bound_texture_2d,
            BindingSlot::ActiveTexture => self.active_texture_unit,
            BindingSlot::DrawFramebuffer => self.bound_draw_framebuffer,
            BindingSlot::UnpackAlignment => self.unpack_alignment,
        }
    }

    /// Reset every slot in `slots` currently holding `name` to 0
    pub(crate) fn clear_binding(&mut self, slots: &[BindingSlot], name: GLuint) {
        for slot in slots {
            if self.binding(*slot) == name {
                self.record_binding(*slot, 0);
            }
        }
    }

    // Vertex attributes

    pub fn vertex_attrib(&self, index: GLuint) -> Option<&VertexAttrib> {
        self.vertex_attribs.get(&index)
    }

    pub(crate) fn vertex_attrib_mut(&mut self, index: GLuint) -> &mut VertexAttrib {
        self.vertex_attribs.entry(index).or_default()
    }

    /// Enabled attributes backed by client memory, in index order
    pub fn client_attribs(&self) -> impl Iterator<Item = (GLuint, &VertexAttrib)> {
        self.vertex_attribs
            .iter()
            .filter(|(_, attrib)| attrib.client_data().is_some())
            .map(|(index, attrib)| (*index, attrib))
    }

    // Cached parameters

    pub fn cached(&self, pname: GLenum) -> Option<&Value> {
        self.cached_parameters.get(&pname)
    }

    /// Overwrite a cached flag. Names outside the snapshot stay uncached.
    pub(crate) fn set_cached_flag(&mut self, pname: GLenum, enabled: bool) {
        if let Some(value) = self.cached_parameters.get_mut(&pname) {
            *value = Value::Bool(enabled);
        }
    }

    /// Overwrite a cached value, only if the snapshot holds it
    pub(crate) fn update_cached(&mut self, pname: GLenum, value: Value) {
        if let Some(cached) = self.cached_parameters.get_mut(&pname) {
            *cached = value;
        }
    }

    pub(crate) fn load_snapshot(&mut self, snapshot: BTreeMap<GLenum, Value>) {
        self.cached_parameters = snapshot.into_iter().collect();
    }

    pub fn has_snapshot(&self) -> bool {
        !self.cached_parameters.is_empty()
    }
}
