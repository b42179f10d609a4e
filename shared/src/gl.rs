//! GL ES 2.0 enum values referenced by the proxy's state tracking and size
//! computations.

use crate::types::{GLboolean, GLenum};

pub const FALSE: GLboolean = false;
pub const TRUE: GLboolean = true;

pub const NO_ERROR: GLenum = 0;

// Buffers
pub const ARRAY_BUFFER: GLenum = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: GLenum = 0x8893;
pub const ARRAY_BUFFER_BINDING: GLenum = 0x8894;
pub const ELEMENT_ARRAY_BUFFER_BINDING: GLenum = 0x8895;
pub const STATIC_DRAW: GLenum = 0x88E4;

// Framebuffers & textures
pub const FRAMEBUFFER: GLenum = 0x8D40;
pub const FRAMEBUFFER_BINDING: GLenum = 0x8CA6;
pub const FRAMEBUFFER_COMPLETE: GLenum = 0x8CD5;
pub const TEXTURE_2D: GLenum = 0x0DE1;
pub const TEXTURE_BINDING_2D: GLenum = 0x8069;
pub const TEXTURE0: GLenum = 0x84C0;
pub const ACTIVE_TEXTURE: GLenum = 0x84E0;
pub const MAX_TEXTURE_SIZE: GLenum = 0x0D33;
pub const TEXTURE_MIN_FILTER: GLenum = 0x2801;
pub const LINEAR: GLenum = 0x2601;

// Programs & shaders
pub const CURRENT_PROGRAM: GLenum = 0x8B8D;
pub const VERTEX_SHADER: GLenum = 0x8B31;
pub const FRAGMENT_SHADER: GLenum = 0x8B30;
pub const COMPILE_STATUS: GLenum = 0x8B81;
pub const LINK_STATUS: GLenum = 0x8B82;
pub const INFO_LOG_LENGTH: GLenum = 0x8B84;
pub const SHADER_SOURCE_LENGTH: GLenum = 0x8B88;
pub const MAX_VERTEX_ATTRIBS: GLenum = 0x8869;

// Capabilities
pub const BLEND: GLenum = 0x0BE2;
pub const CULL_FACE: GLenum = 0x0B44;
pub const DEPTH_TEST: GLenum = 0x0B71;
pub const SCISSOR_TEST: GLenum = 0x0C11;
pub const STENCIL_TEST: GLenum = 0x0B90;
pub const DITHER: GLenum = 0x0BD0;

// Queryable state
pub const VIEWPORT: GLenum = 0x0BA2;
pub const UNPACK_ALIGNMENT: GLenum = 0x0CF5;
pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const EXTENSIONS: GLenum = 0x1F03;
pub const SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;

// Data types
pub const BYTE: GLenum = 0x1400;
pub const UNSIGNED_BYTE: GLenum = 0x1401;
pub const SHORT: GLenum = 0x1402;
pub const UNSIGNED_SHORT: GLenum = 0x1403;
pub const INT: GLenum = 0x1404;
pub const UNSIGNED_INT: GLenum = 0x1405;
pub const FLOAT: GLenum = 0x1406;
pub const FIXED: GLenum = 0x140C;
pub const UNSIGNED_SHORT_4_4_4_4: GLenum = 0x8033;
pub const UNSIGNED_SHORT_5_5_5_1: GLenum = 0x8034;
pub const UNSIGNED_SHORT_5_6_5: GLenum = 0x8363;

// Pixel formats
pub const DEPTH_COMPONENT: GLenum = 0x1902;
pub const ALPHA: GLenum = 0x1906;
pub const RGB: GLenum = 0x1907;
pub const RGBA: GLenum = 0x1908;
pub const LUMINANCE: GLenum = 0x1909;
pub const LUMINANCE_ALPHA: GLenum = 0x190A;
pub const BGRA_EXT: GLenum = 0x80E1;

// Drawing
pub const TRIANGLES: GLenum = 0x0004;
pub const COLOR_BUFFER_BIT: GLenum = 0x4000;
