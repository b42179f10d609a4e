use std::{any::type_name, collections::HashMap};

use log::warn;

use glrelay_shared::{function_index, FromValue, GLsizei, GLuint, Value};

use crate::{
    context::{ActiveInfo, Context, IndexSource, ShaderPrecision, VertexPointer},
    error::ProxyError,
};

/// Entry point callable by name. Arguments follow the parameter order of the
/// matching `Context` method, with slices passed as lists or bytes.
pub type Trampoline = fn(&mut Context, &mut Args) -> Result<Value, ProxyError>;

/// One named entry point
#[derive(Clone, Copy)]
pub struct FunctionEntry {
    /// Name in the remote function list
    pub remote: &'static str,
    /// Name callers resolve, e.g. `glClear`
    pub local: &'static str,
    /// `None` for remote functions driven by the context itself
    pub trampoline: Option<Trampoline>,
}

/// Dynamically typed arguments for a trampoline, consumed in order
pub struct Args {
    function: &'static str,
    values: Vec<Value>,
    position: usize,
}

/// A pointer argument: client data, or an offset into a bound buffer
enum Pointer {
    Data(Vec<u8>),
    Offset(u32),
}

impl Args {
    pub fn new(function: &'static str, values: Vec<Value>) -> Self {
        Self {
            function,
            values,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.position)
    }

    fn take(&mut self) -> Result<(usize, &Value), ProxyError> {
        let index = self.position;
        let value = self
            .values
            .get(index)
            .ok_or(ProxyError::MissingArgument {
                function: self.function,
                index,
            })?;
        self.position += 1;
        Ok((index, value))
    }

    fn bad_argument(&self, index: usize, expected: &'static str) -> ProxyError {
        ProxyError::BadArgument {
            function: self.function,
            index,
            expected,
            found: self.values[index].kind(),
        }
    }

    pub fn next<T: FromValue>(&mut self) -> Result<T, ProxyError> {
        let (index, value) = self.take()?;
        match value.get::<T>() {
            Some(converted) => Ok(converted),
            None => Err(self.bad_argument(index, type_name::<T>())),
        }
    }

    /// Optional data: null reads as `None`
    pub fn bytes(&mut self) -> Result<Option<Vec<u8>>, ProxyError> {
        let (index, value) = self.take()?;
        match value {
            Value::Null => Ok(None),
            other => match other.get::<Vec<u8>>() {
                Some(bytes) => Ok(Some(bytes)),
                None => Err(self.bad_argument(index, "bytes")),
            },
        }
    }

    pub fn list<T: FromValue>(&mut self) -> Result<Vec<T>, ProxyError> {
        let (index, value) = self.take()?;
        let items = match value {
            Value::List(items) => items.iter().map(Value::get::<T>).collect::<Option<Vec<_>>>(),
            _ => None,
        };
        items.ok_or_else(|| self.bad_argument(index, type_name::<Vec<T>>()))
    }

    pub fn array<T: FromValue, const N: usize>(&mut self) -> Result<[T; N], ProxyError> {
        let index = self.position;
        let items = self.list::<T>()?;
        items
            .try_into()
            .map_err(|_| self.bad_argument(index, type_name::<[T; N]>()))
    }

    fn pointer(&mut self) -> Result<Pointer, ProxyError> {
        let (index, value) = self.take()?;
        match value {
            Value::Bytes(data) => Ok(Pointer::Data(data.clone())),
            other => match other.get::<u32>() {
                Some(offset) => Ok(Pointer::Offset(offset)),
                None => Err(self.bad_argument(index, "bytes or offset")),
            },
        }
    }
}

fn done() -> Result<Value, ProxyError> {
    Ok(Value::Null)
}

fn names(names: &[GLuint]) -> Value {
    Value::List(names.iter().copied().map(Value::from).collect())
}

fn generate(
    context: &mut Context,
    args: &mut Args,
    generator: fn(&Context, &mut [GLuint]) -> usize,
) -> Result<Value, ProxyError> {
    let count = args.next::<GLsizei>()?;
    let mut generated = vec![0; usize::try_from(count).unwrap_or(0)];
    let filled = generator(context, &mut generated);
    Ok(names(&generated[..filled]))
}

fn active_info(info: Option<ActiveInfo>) -> Value {
    match info {
        Some(info) => Value::Map(
            [
                ("rsize".to_string(), Value::from(info.size)),
                ("rtype".to_string(), Value::from(info.type_)),
                ("rname".to_string(), Value::from(info.name)),
            ]
            .into(),
        ),
        None => Value::Null,
    }
}

fn precision(format: ShaderPrecision) -> Value {
    Value::Map(
        [
            ("rangeMin".to_string(), Value::from(format.range_min)),
            ("rangeMax".to_string(), Value::from(format.range_max)),
            ("precision".to_string(), Value::from(format.precision)),
        ]
        .into(),
    )
}

fn entry(local: &'static str, remote: &'static str, trampoline: Trampoline) -> FunctionEntry {
    FunctionEntry {
        remote,
        local,
        trampoline: Some(trampoline),
    }
}

fn remote_only(name: &'static str) -> FunctionEntry {
    FunctionEntry {
        remote: name,
        local: name,
        trampoline: None,
    }
}

/// The fixed set of entry points, built once per registry
pub struct FunctionTable {
    entries: Vec<FunctionEntry>,
    by_local: HashMap<&'static str, usize>,
}

impl FunctionTable {
    /// Build the table of every supported entry point.
    ///
    /// Panics on a duplicate local name or a remote name missing from the
    /// remote function list.
    pub fn standard() -> Self {
        Self::from_entries(standard_entries())
    }

    fn from_entries(entries: Vec<FunctionEntry>) -> Self {
        let mut by_local = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if function_index(entry.remote).is_none() {
                panic!("'{}' is not a remote function", entry.remote);
            }
            if by_local.insert(entry.local, position).is_some() {
                panic!("'{}' registered twice", entry.local);
            }
        }
        Self { entries, by_local }
    }

    /// Find an entry by its local name
    pub fn lookup(&self, local: &str) -> Option<&FunctionEntry> {
        let found = self
            .by_local
            .get(local)
            .map(|position| &self.entries[*position]);
        if found.is_none() {
            warn!("Unknown function '{}'", local);
        }
        found
    }

    pub fn entries(&self) -> &[FunctionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn standard_entries() -> Vec<FunctionEntry> {
    vec![
        entry("glActiveTexture", "activeTexture", |c, a| {
            c.active_texture(a.next()?);
            done()
        }),
        entry("glAttachShader", "attachShader", |c, a| {
            c.attach_shader(a.next()?, a.next()?);
            done()
        }),
        entry("glBindAttribLocation", "bindAttribLocation", |c, a| {
            let (program, index, name) = (a.next()?, a.next()?, a.next::<String>()?);
            c.bind_attrib_location(program, index, &name);
            done()
        }),
        entry("glBindBuffer", "bindBuffer", |c, a| {
            c.bind_buffer(a.next()?, a.next()?);
            done()
        }),
        entry("glBindFramebuffer", "bindFramebuffer", |c, a| {
            c.bind_framebuffer(a.next()?, a.next()?);
            done()
        }),
        entry("glBindRenderbuffer", "bindRenderbuffer", |c, a| {
            c.bind_renderbuffer(a.next()?, a.next()?);
            done()
        }),
        entry("glBindTexture", "bindTexture", |c, a| {
            c.bind_texture(a.next()?, a.next()?);
            done()
        }),
        entry("glBlendColor", "blendColor", |c, a| {
            c.blend_color(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glBlendEquation", "blendEquation", |c, a| {
            c.blend_equation(a.next()?);
            done()
        }),
        entry("glBlendEquationSeparate", "blendEquationSeparate", |c, a| {
            c.blend_equation_separate(a.next()?, a.next()?);
            done()
        }),
        entry("glBlendFunc", "blendFunc", |c, a| {
            c.blend_func(a.next()?, a.next()?);
            done()
        }),
        entry("glBlendFuncSeparate", "blendFuncSeparate", |c, a| {
            c.blend_func_separate(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glBufferData", "bufferData", |c, a| {
            let (target, size, data, usage) = (a.next()?, a.next()?, a.bytes()?, a.next()?);
            c.buffer_data(target, size, data.as_deref(), usage);
            done()
        }),
        entry("glBufferSubData", "bufferSubData", |c, a| {
            let (target, offset, data) = (a.next()?, a.next()?, a.next::<Vec<u8>>()?);
            c.buffer_sub_data(target, offset, &data);
            done()
        }),
        entry("glCheckFramebufferStatus", "checkFramebufferStatus", |c, a| {
            Ok(c.check_framebuffer_status(a.next()?).into())
        }),
        entry("glClear", "clear", |c, a| {
            c.clear(a.next()?);
            done()
        }),
        entry("glClearColor", "clearColor", |c, a| {
            c.clear_color(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glClearDepthf", "clearDepthf", |c, a| {
            c.clear_depthf(a.next()?);
            done()
        }),
        entry("glClearStencil", "clearStencil", |c, a| {
            c.clear_stencil(a.next()?);
            done()
        }),
        entry("glColorMask", "colorMask", |c, a| {
            c.color_mask(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glCompileShader", "compileShader", |c, a| {
            c.compile_shader(a.next()?);
            done()
        }),
        entry("glCompressedTexImage2D", "compressedTexImage2D", |c, a| {
            let (target, level, internalformat) = (a.next()?, a.next()?, a.next()?);
            let (width, height, border) = (a.next()?, a.next()?, a.next()?);
            let data = a.next::<Vec<u8>>()?;
            c.compressed_tex_image_2d(target, level, internalformat, width, height, border, &data);
            done()
        }),
        entry("glCompressedTexSubImage2D", "compressedTexSubImage2D", |c, a| {
            let (target, level, xoffset, yoffset) = (a.next()?, a.next()?, a.next()?, a.next()?);
            let (width, height, format) = (a.next()?, a.next()?, a.next()?);
            let data = a.next::<Vec<u8>>()?;
            c.compressed_tex_sub_image_2d(
                target, level, xoffset, yoffset, width, height, format, &data,
            );
            done()
        }),
        entry("glCopyTexImage2D", "copyTexImage2D", |c, a| {
            c.copy_tex_image_2d(
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
            );
            done()
        }),
        entry("glCopyTexSubImage2D", "copyTexSubImage2D", |c, a| {
            c.copy_tex_sub_image_2d(
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
                a.next()?,
            );
            done()
        }),
        entry("glCreateProgram", "createProgram", |c, _| {
            Ok(c.create_program().into())
        }),
        entry("glCreateShader", "createShader", |c, a| {
            Ok(c.create_shader(a.next()?).into())
        }),
        entry("glCullFace", "cullFace", |c, a| {
            c.cull_face(a.next()?);
            done()
        }),
        entry("glDeleteBuffers", "deleteBuffers", |c, a| {
            c.delete_buffers(&a.list::<GLuint>()?);
            done()
        }),
        entry("glDeleteFramebuffers", "deleteFramebuffers", |c, a| {
            c.delete_framebuffers(&a.list::<GLuint>()?);
            done()
        }),
        entry("glDeleteProgram", "deleteProgram", |c, a| {
            c.delete_program(a.next()?);
            done()
        }),
        entry("glDeleteRenderbuffers", "deleteRenderbuffers", |c, a| {
            c.delete_renderbuffers(&a.list::<GLuint>()?);
            done()
        }),
        entry("glDeleteShader", "deleteShader", |c, a| {
            c.delete_shader(a.next()?);
            done()
        }),
        entry("glDeleteTextures", "deleteTextures", |c, a| {
            c.delete_textures(&a.list::<GLuint>()?);
            done()
        }),
        entry("glDepthFunc", "depthFunc", |c, a| {
            c.depth_func(a.next()?);
            done()
        }),
        entry("glDepthMask", "depthMask", |c, a| {
            c.depth_mask(a.next()?);
            done()
        }),
        entry("glDepthRangef", "depthRangef", |c, a| {
            c.depth_rangef(a.next()?, a.next()?);
            done()
        }),
        entry("glDetachShader", "detachShader", |c, a| {
            c.detach_shader(a.next()?, a.next()?);
            done()
        }),
        entry("glDisableVertexAttribArray", "disableVertexAttribArray", |c, a| {
            c.disable_vertex_attrib_array(a.next()?);
            done()
        }),
        entry("glDrawArrays", "drawArrays", |c, a| {
            c.draw_arrays(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glDrawElements", "drawElements", |c, a| {
            let (mode, count, type_) = (a.next()?, a.next()?, a.next()?);
            match a.pointer()? {
                Pointer::Data(data) => c.draw_elements(mode, count, type_, IndexSource::Client(&data)),
                Pointer::Offset(offset) => {
                    c.draw_elements(mode, count, type_, IndexSource::Offset(offset))
                }
            }
            done()
        }),
        entry("glEnableVertexAttribArray", "enableVertexAttribArray", |c, a| {
            c.enable_vertex_attrib_array(a.next()?);
            done()
        }),
        entry("glFinish", "finish", |c, _| {
            c.finish();
            done()
        }),
        entry("glFlush", "flush", |c, _| {
            c.flush();
            done()
        }),
        entry("glFramebufferRenderbuffer", "framebufferRenderbuffer", |c, a| {
            c.framebuffer_renderbuffer(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glFramebufferTexture2D", "framebufferTexture2D", |c, a| {
            c.framebuffer_texture_2d(a.next()?, a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glFrontFace", "frontFace", |c, a| {
            c.front_face(a.next()?);
            done()
        }),
        entry("glGenBuffers", "genBuffers", |c, a| {
            generate(c, a, Context::gen_buffers)
        }),
        entry("glGenFramebuffers", "genFramebuffers", |c, a| {
            generate(c, a, Context::gen_framebuffers)
        }),
        entry("glGenRenderbuffers", "genRenderbuffers", |c, a| {
            generate(c, a, Context::gen_renderbuffers)
        }),
        entry("glGenTextures", "genTextures", |c, a| {
            generate(c, a, Context::gen_textures)
        }),
        entry("glGenerateMipmap", "generateMipmap", |c, a| {
            c.generate_mipmap(a.next()?);
            done()
        }),
        entry("glGetActiveAttrib", "getActiveAttrib", |c, a| {
            Ok(active_info(c.get_active_attrib(a.next()?, a.next()?, a.next()?)))
        }),
        entry("glGetActiveUniform", "getActiveUniform", |c, a| {
            Ok(active_info(c.get_active_uniform(a.next()?, a.next()?, a.next()?)))
        }),
        entry("glGetAttachedShaders", "getAttachedShaders", |c, a| {
            let (program, max_count) = (a.next()?, a.next::<GLsizei>()?);
            let mut shaders = vec![0; usize::try_from(max_count).unwrap_or(0)];
            let count = c.get_attached_shaders(program, &mut shaders);
            Ok(names(&shaders[..count]))
        }),
        entry("glGetAttribLocation", "getAttribLocation", |c, a| {
            let (program, name) = (a.next()?, a.next::<String>()?);
            Ok(c.get_attrib_location(program, &name).into())
        }),
        entry("glGetString", "getString", |c, a| {
            Ok(c.get_string(a.next()?).into())
        }),
        entry("glGetIntegerv", "getIntegerv", |c, a| {
            let values = c.get_integerv(a.next()?);
            Ok(Value::List(values.into_iter().map(Value::from).collect()))
        }),
        entry("glGetBooleanv", "getBooleanv", |c, a| {
            Ok(c.get_booleanv(a.next()?).into())
        }),
        entry("glEnable", "enable", |c, a| {
            c.enable(a.next()?);
            done()
        }),
        entry("glDisable", "disable", |c, a| {
            c.disable(a.next()?);
            done()
        }),
        entry("glGetBufferParameteriv", "getBufferParameteriv", |c, a| {
            Ok(c.get_buffer_parameteriv(a.next()?, a.next()?).into())
        }),
        entry("glGetError", "getError", |c, _| Ok(c.get_error().into())),
        entry("glGetFloatv", "getParameter", |c, a| {
            Ok(c.get_floatv(a.next()?).into())
        }),
        entry(
            "glGetFramebufferAttachmentParameteriv",
            "getFramebufferAttachmentParameteriv",
            |c, a| {
                Ok(c
                    .get_framebuffer_attachment_parameteriv(a.next()?, a.next()?, a.next()?)
                    .into())
            },
        ),
        entry("glGetProgramInfoLog", "getProgramInfoLog", |c, a| {
            Ok(c.get_program_info_log(a.next()?, a.next()?).into())
        }),
        entry("glGetProgramiv", "getProgramiv", |c, a| {
            Ok(c.get_programiv(a.next()?, a.next()?).into())
        }),
        entry("glGetRenderbufferParameteriv", "getRenderbufferParameteriv", |c, a| {
            Ok(c.get_renderbuffer_parameteriv(a.next()?, a.next()?).into())
        }),
        entry("glGetShaderInfoLog", "getShaderInfoLog", |c, a| {
            Ok(c.get_shader_info_log(a.next()?, a.next()?).into())
        }),
        entry("glGetShaderPrecisionFormat", "getShaderPrecisionFormat", |c, a| {
            Ok(precision(c.get_shader_precision_format(a.next()?, a.next()?)))
        }),
        entry("glGetShaderSource", "getShaderSource", |c, a| {
            Ok(c.get_shader_source(a.next()?, a.next()?).into())
        }),
        entry("glGetShaderiv", "getShaderiv", |c, a| {
            Ok(c.get_shaderiv(a.next()?, a.next()?).into())
        }),
        entry("glGetTexParameterfv", "getTexParameterfv", |c, a| {
            Ok(c.get_tex_parameterfv(a.next()?, a.next()?).into())
        }),
        entry("glGetTexParameteriv", "getTexParameteriv", |c, a| {
            Ok(c.get_tex_parameteriv(a.next()?, a.next()?).into())
        }),
        entry("glGetUniformLocation", "getUniformLocation", |c, a| {
            let (program, name) = (a.next()?, a.next::<String>()?);
            Ok(c.get_uniform_location(program, &name).into())
        }),
        entry("glGetUniformfv", "getUniformfv", |c, a| {
            Ok(c.get_uniformfv(a.next()?, a.next()?).into())
        }),
        entry("glGetUniformiv", "getUniformiv", |c, a| {
            Ok(c.get_uniformiv(a.next()?, a.next()?).into())
        }),
        entry("glGetVertexAttribPointerv", "getVertexAttribPointerv", |c, a| {
            c.get_vertex_attrib_pointerv(a.next()?, a.next()?)
        }),
        entry("glGetVertexAttribfv", "getVertexAttribfv", |c, a| {
            Ok(c.get_vertex_attribfv(a.next()?, a.next()?).into())
        }),
        entry("glGetVertexAttribiv", "getVertexAttribiv", |c, a| {
            Ok(c.get_vertex_attribiv(a.next()?, a.next()?).into())
        }),
        entry("glHint", "hint", |c, a| {
            c.hint(a.next()?, a.next()?);
            done()
        }),
        entry("glIsBuffer", "isBuffer", |c, a| Ok(c.is_buffer(a.next()?).into())),
        entry("glIsEnabled", "isEnabled", |c, a| Ok(c.is_enabled(a.next()?).into())),
        entry("glIsFramebuffer", "isFramebuffer", |c, a| {
            Ok(c.is_framebuffer(a.next()?).into())
        }),
        entry("glIsProgram", "isProgram", |c, a| Ok(c.is_program(a.next()?).into())),
        entry("glIsRenderbuffer", "isRenderbuffer", |c, a| {
            Ok(c.is_renderbuffer(a.next()?).into())
        }),
        entry("glIsShader", "isShader", |c, a| Ok(c.is_shader(a.next()?).into())),
        entry("glIsTexture", "isTexture", |c, a| Ok(c.is_texture(a.next()?).into())),
        entry("glLineWidth", "lineWidth", |c, a| {
            c.line_width(a.next()?);
            done()
        }),
        entry("glLinkProgram", "linkProgram", |c, a| {
            c.link_program(a.next()?);
            done()
        }),
        entry("glPixelStorei", "pixelStorei", |c, a| {
            c.pixel_storei(a.next()?, a.next()?);
            done()
        }),
        entry("glPolygonOffset", "polygonOffset", |c, a| {
            c.polygon_offset(a.next()?, a.next()?);
            done()
        }),
        entry("glReadPixels", "readPixels", |c, a| {
            let (x, y, width, height) = (a.next()?, a.next()?, a.next()?, a.next()?);
            let (format, type_) = (a.next()?, a.next()?);
            let mut pixels = vec![0; glrelay_shared::image_size(width, height, format, type_)];
            let len = c.read_pixels(x, y, width, height, format, type_, &mut pixels);
            pixels.truncate(len);
            Ok(pixels.into())
        }),
        entry("glReleaseShaderCompiler", "releaseShaderCompiler", |c, _| {
            c.release_shader_compiler();
            done()
        }),
        entry("glRenderbufferStorage", "renderbufferStorage", |c, a| {
            c.renderbuffer_storage(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glSampleCoverage", "sampleCoverage", |c, a| {
            c.sample_coverage(a.next()?, a.next()?);
            done()
        }),
        entry("glScissor", "scissor", |c, a| {
            c.scissor(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glShaderBinary", "shaderBinary", |c, a| {
            let (shaders, format, binary) = (a.list::<GLuint>()?, a.next()?, a.next::<Vec<u8>>()?);
            c.shader_binary(&shaders, format, &binary)
        }),
        entry("glShaderSource", "shaderSource", |c, a| {
            let (shader, sources) = (a.next()?, a.list::<String>()?);
            let sources = sources.iter().map(String::as_str).collect::<Vec<_>>();
            c.shader_source(shader, &sources);
            done()
        }),
        entry("glStencilFunc", "stencilFunc", |c, a| {
            c.stencil_func(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glStencilFuncSeparate", "stencilFuncSeparate", |c, a| {
            c.stencil_func_separate(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glStencilMask", "stencilMask", |c, a| {
            c.stencil_mask(a.next()?);
            done()
        }),
        entry("glStencilMaskSeparate", "stencilMaskSeparate", |c, a| {
            c.stencil_mask_separate(a.next()?, a.next()?);
            done()
        }),
        entry("glStencilOp", "stencilOp", |c, a| {
            c.stencil_op(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glStencilOpSeparate", "stencilOpSeparate", |c, a| {
            c.stencil_op_separate(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glTexImage2D", "texImage2D", |c, a| {
            let (target, level, internalformat) = (a.next()?, a.next()?, a.next()?);
            let (width, height, border) = (a.next()?, a.next()?, a.next()?);
            let (format, type_, pixels) = (a.next()?, a.next()?, a.bytes()?);
            c.tex_image_2d(
                target,
                level,
                internalformat,
                width,
                height,
                border,
                format,
                type_,
                pixels.as_deref(),
            );
            done()
        }),
        entry("glTexParameterf", "texParameterf", |c, a| {
            c.tex_parameterf(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glTexParameterfv", "texParameterfv", |c, a| {
            let (target, pname, params) = (a.next()?, a.next()?, a.list::<f32>()?);
            c.tex_parameterfv(target, pname, &params);
            done()
        }),
        entry("glTexParameteri", "texParameteri", |c, a| {
            c.tex_parameteri(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glTexParameteriv", "texParameteriv", |c, a| {
            let (target, pname, params) = (a.next()?, a.next()?, a.list::<i32>()?);
            c.tex_parameteriv(target, pname, &params);
            done()
        }),
        entry("glTexSubImage2D", "texSubImage2D", |c, a| {
            let (target, level, xoffset, yoffset) = (a.next()?, a.next()?, a.next()?, a.next()?);
            let (width, height) = (a.next()?, a.next()?);
            let (format, type_, pixels) = (a.next()?, a.next()?, a.bytes()?);
            c.tex_sub_image_2d(
                target,
                level,
                xoffset,
                yoffset,
                width,
                height,
                format,
                type_,
                pixels.as_deref(),
            );
            done()
        }),
        entry("glUniform1f", "uniform1f", |c, a| {
            c.uniform1f(a.next()?, a.next()?);
            done()
        }),
        entry("glUniform1fv", "uniform1fv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<f32>()?);
            c.uniform1fv(location, count, &value);
            done()
        }),
        entry("glUniform1i", "uniform1i", |c, a| {
            c.uniform1i(a.next()?, a.next()?);
            done()
        }),
        entry("glUniform1iv", "uniform1iv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<i32>()?);
            c.uniform1iv(location, count, &value);
            done()
        }),
        entry("glUniform2f", "uniform2f", |c, a| {
            c.uniform2f(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glUniform2fv", "uniform2fv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<f32>()?);
            c.uniform2fv(location, count, &value);
            done()
        }),
        entry("glUniform2i", "uniform2i", |c, a| {
            c.uniform2i(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glUniform2iv", "uniform2iv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<i32>()?);
            c.uniform2iv(location, count, &value);
            done()
        }),
        entry("glUniform3f", "uniform3f", |c, a| {
            c.uniform3f(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glUniform3fv", "uniform3fv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<f32>()?);
            c.uniform3fv(location, count, &value);
            done()
        }),
        entry("glUniform3i", "uniform3i", |c, a| {
            c.uniform3i(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glUniform3iv", "uniform3iv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<i32>()?);
            c.uniform3iv(location, count, &value);
            done()
        }),
        entry("glUniform4f", "uniform4f", |c, a| {
            c.uniform4f(a.next()?, a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glUniform4fv", "uniform4fv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<f32>()?);
            c.uniform4fv(location, count, &value);
            done()
        }),
        entry("glUniform4i", "uniform4i", |c, a| {
            c.uniform4i(a.next()?, a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glUniform4iv", "uniform4iv", |c, a| {
            let (location, count, value) = (a.next()?, a.next()?, a.list::<i32>()?);
            c.uniform4iv(location, count, &value);
            done()
        }),
        entry("glUniformMatrix2fv", "uniformMatrix2fv", |c, a| {
            let (location, count, transpose) = (a.next()?, a.next()?, a.next()?);
            c.uniform_matrix2fv(location, count, transpose, &a.list::<f32>()?);
            done()
        }),
        entry("glUniformMatrix3fv", "uniformMatrix3fv", |c, a| {
            let (location, count, transpose) = (a.next()?, a.next()?, a.next()?);
            c.uniform_matrix3fv(location, count, transpose, &a.list::<f32>()?);
            done()
        }),
        entry("glUniformMatrix4fv", "uniformMatrix4fv", |c, a| {
            let (location, count, transpose) = (a.next()?, a.next()?, a.next()?);
            c.uniform_matrix4fv(location, count, transpose, &a.list::<f32>()?);
            done()
        }),
        entry("glUseProgram", "useProgram", |c, a| {
            c.use_program(a.next()?);
            done()
        }),
        entry("glValidateProgram", "validateProgram", |c, a| {
            c.validate_program(a.next()?);
            done()
        }),
        entry("glVertexAttrib1f", "vertexAttrib1f", |c, a| {
            c.vertex_attrib1f(a.next()?, a.next()?);
            done()
        }),
        entry("glVertexAttrib1fv", "vertexAttrib1fv", |c, a| {
            let (index, v) = (a.next()?, a.array::<f32, 1>()?);
            c.vertex_attrib1fv(index, &v);
            done()
        }),
        entry("glVertexAttrib2f", "vertexAttrib2f", |c, a| {
            c.vertex_attrib2f(a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glVertexAttrib2fv", "vertexAttrib2fv", |c, a| {
            let (index, v) = (a.next()?, a.array::<f32, 2>()?);
            c.vertex_attrib2fv(index, &v);
            done()
        }),
        entry("glVertexAttrib3f", "vertexAttrib3f", |c, a| {
            c.vertex_attrib3f(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glVertexAttrib3fv", "vertexAttrib3fv", |c, a| {
            let (index, v) = (a.next()?, a.array::<f32, 3>()?);
            c.vertex_attrib3fv(index, &v);
            done()
        }),
        entry("glVertexAttrib4f", "vertexAttrib4f", |c, a| {
            c.vertex_attrib4f(a.next()?, a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glVertexAttrib4fv", "vertexAttrib4fv", |c, a| {
            let (index, v) = (a.next()?, a.array::<f32, 4>()?);
            c.vertex_attrib4fv(index, &v);
            done()
        }),
        entry("glVertexAttribPointer", "vertexAttribPointer", |c, a| {
            let (index, size, type_) = (a.next()?, a.next()?, a.next()?);
            let (normalized, stride) = (a.next()?, a.next()?);
            match a.pointer()? {
                Pointer::Data(data) => c.vertex_attrib_pointer(
                    index,
                    size,
                    type_,
                    normalized,
                    stride,
                    VertexPointer::Client(&data),
                ),
                Pointer::Offset(offset) => c.vertex_attrib_pointer(
                    index,
                    size,
                    type_,
                    normalized,
                    stride,
                    VertexPointer::Offset(offset),
                ),
            }
            done()
        }),
        entry("glViewport", "viewport", |c, a| {
            c.viewport(a.next()?, a.next()?, a.next()?, a.next()?);
            done()
        }),
        entry("glBlitFramebufferEXT", "blitFramebufferEXT", |c, a| {
            let (src_x0, src_y0, src_x1, src_y1) = (a.next()?, a.next()?, a.next()?, a.next()?);
            let (dst_x0, dst_y0, dst_x1, dst_y1) = (a.next()?, a.next()?, a.next()?, a.next()?);
            let (mask, filter) = (a.next()?, a.next()?);
            c.blit_framebuffer_ext(
                src_x0, src_y0, src_x1, src_y1, dst_x0, dst_y0, dst_x1, dst_y1, mask, filter,
            );
            done()
        }),
        entry(
            "glRenderbufferStorageMultisampleEXT",
            "renderbufferStorageMultisampleEXT",
            |c, a| {
                c.renderbuffer_storage_multisample_ext(
                    a.next()?,
                    a.next()?,
                    a.next()?,
                    a.next()?,
                    a.next()?,
                );
                done()
            },
        ),
        entry("glGetTexLevelParameteriv", "getTexLevelParameteriv", |c, a| {
            c.get_tex_level_parameteriv(a.next()?, a.next()?, a.next()?)
        }),
        remote_only("makeCurrent"),
        remote_only("swapBuffers"),
    ]
}
