use log::warn;

use crate::{
    gl,
    types::{GLenum, GLint, GLsizei},
};

// (format, type, bytes per pixel)
const BYTES_PER_PIXEL: &[(GLenum, GLenum, usize)] = &[
    (gl::RGBA, gl::UNSIGNED_BYTE, 4),
    (gl::RGBA, gl::BYTE, 4),
    (gl::RGBA, gl::UNSIGNED_SHORT_4_4_4_4, 2),
    (gl::RGBA, gl::UNSIGNED_SHORT_5_5_5_1, 2),
    (gl::RGBA, gl::FLOAT, 16),
    (gl::RGB, gl::UNSIGNED_BYTE, 3),
    (gl::RGB, gl::BYTE, 3),
    (gl::RGB, gl::UNSIGNED_SHORT_5_6_5, 2),
    (gl::RGB, gl::FLOAT, 12),
    (gl::DEPTH_COMPONENT, gl::UNSIGNED_SHORT, 2),
    (gl::DEPTH_COMPONENT, gl::UNSIGNED_INT, 4),
    (gl::DEPTH_COMPONENT, gl::FLOAT, 4),
    (gl::LUMINANCE_ALPHA, gl::UNSIGNED_BYTE, 1),
    (gl::LUMINANCE, gl::UNSIGNED_BYTE, 1),
    (gl::ALPHA, gl::UNSIGNED_BYTE, 1),
    (gl::BGRA_EXT, gl::UNSIGNED_BYTE, 4),
    (gl::BGRA_EXT, gl::BYTE, 4),
    (gl::BGRA_EXT, gl::UNSIGNED_SHORT_4_4_4_4, 2),
    (gl::BGRA_EXT, gl::UNSIGNED_SHORT_5_5_5_1, 2),
    (gl::BGRA_EXT, gl::FLOAT, 16),
];

/// Number of bytes of client memory a `width` x `height` image of the given
/// format/type occupies. Unknown combinations log a warning and yield 0.
pub fn image_size(width: GLsizei, height: GLsizei, format: GLenum, type_: GLenum) -> usize {
    let bytes_per_pixel = BYTES_PER_PIXEL
        .iter()
        .find(|(f, t, _)| *f == format && *t == type_)
        .map(|(_, _, bpp)| *bpp)
        .unwrap_or(0);

    if bytes_per_pixel == 0 {
        warn!("Unknown texture format {:#x} - {:#x}", format, type_);
    }

    let width = width.max(0) as usize;
    let height = height.max(0) as usize;
    width * bytes_per_pixel * height
}

/// Size in bytes of one component of the given data type
pub fn element_size(type_: GLenum) -> usize {
    match type_ {
        gl::SHORT | gl::UNSIGNED_SHORT => 2,
        gl::FLOAT | gl::FIXED | gl::INT | gl::UNSIGNED_INT => 4,
        _ => 1,
    }
}

pub fn vertex_size(components: GLint, type_: GLenum) -> usize {
    element_size(type_) * components.max(0) as usize
}

/// Bytes spanned by `count` vertices laid out with the given stride, starting
/// at the first vertex: `(count - 1) * stride + vertex_size`. A zero stride
/// means tightly packed.
pub fn vertex_buffer_size(count: GLsizei, components: GLint, type_: GLenum, stride: GLsizei) -> usize {
    if count <= 0 {
        return 0;
    }

    let vertex_size = vertex_size(components, type_);
    let stride = if stride == 0 {
        vertex_size
    } else {
        stride.max(0) as usize
    };

    vertex_size + (count as usize - 1) * stride
}
