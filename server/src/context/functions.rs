use log::{error, warn};

use glrelay_shared::{
    element_size, gl, image_size, GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLsizei, GLuint,
    Value,
};

use super::{
    convert_or, ActiveInfo, BindingSlot, Context, IndexSource, ShaderPrecision, VertexPointer,
    VertexSource,
};

fn len_of(count: GLsizei, components: usize) -> usize {
    usize::try_from(count).unwrap_or(0) * components
}

fn as_glint(len: usize) -> GLint {
    GLint::try_from(len).unwrap_or(GLint::MAX)
}

/// Cut `text` to `buf_size - 1` bytes, leaving room for a terminator
fn fit_to_buffer(mut text: String, buf_size: GLsizei) -> String {
    let max_len = usize::try_from(buf_size.saturating_sub(1)).unwrap_or(0);
    if text.len() > max_len {
        let mut end = max_len;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

// Helpers shared by families of entry points
impl Context {
    fn post_array<T: Copy + Into<Value>>(
        &self,
        function: &'static str,
        mut arguments: Vec<Value>,
        values: &[T],
        len: usize,
    ) -> bool {
        if values.len() < len {
            warn!(
                "{}: expected {} values, got {}",
                function,
                len,
                values.len()
            );
        }
        arguments.extend(values.iter().take(len).map(|value| (*value).into()));
        self.post(function, arguments)
    }

    fn post_names(&self, function: &'static str, names: &[GLuint]) -> bool {
        self.post_array(function, args![as_glint(names.len())], names, names.len())
    }

    /// Fill `names` from a batch allocation. Returns how many were filled.
    fn gen_names(&self, function: &'static str, names: &mut [GLuint]) -> usize {
        let values = self.query_as::<Vec<Value>>(function, Vec::new(), args![as_glint(names.len())]);
        if values.len() != names.len() {
            warn!(
                "{}: requested {} names, received {}",
                function,
                names.len(),
                values.len()
            );
        }
        let filled = values.len().min(names.len());
        for (slot, value) in names.iter_mut().zip(&values) {
            *slot = convert_or(value, 0);
        }
        filled
    }

    fn active_info(
        &self,
        function: &'static str,
        program: GLuint,
        index: GLuint,
        buf_size: GLsizei,
    ) -> Option<ActiveInfo> {
        let values = self.query_as::<std::collections::BTreeMap<String, Value>>(
            function,
            Default::default(),
            args![program, index, buf_size],
        );
        if values.is_empty() {
            return None;
        }
        let field = |key: &str| values.get(key).cloned().unwrap_or(Value::Null);
        Some(ActiveInfo {
            size: convert_or(&field("rsize"), 0),
            type_: convert_or(&field("rtype"), 0),
            name: fit_to_buffer(convert_or(&field("rname"), String::new()), buf_size),
        })
    }

    /// A log or source string, uncut
    fn object_text(&self, function: &'static str, object: GLuint, buf_size: GLsizei) -> String {
        self.query_as(function, String::new(), args![object, buf_size])
    }
}

impl Context {
    pub fn active_texture(&mut self, texture: GLenum) {
        self.post("activeTexture", args![texture]);
        self.state
            .record_binding(BindingSlot::ActiveTexture, texture);
    }

    pub fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.post("attachShader", args![program, shader]);
    }

    pub fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        self.post("bindAttribLocation", args![program, index, name]);
    }

    pub fn bind_buffer(&mut self, target: GLenum, buffer: GLuint) {
        self.post("bindBuffer", args![target, buffer]);
        match target {
            gl::ARRAY_BUFFER => self.state.record_binding(BindingSlot::ArrayBuffer, buffer),
            gl::ELEMENT_ARRAY_BUFFER => self
                .state
                .record_binding(BindingSlot::ElementArrayBuffer, buffer),
            _ => {}
        }
    }

    pub fn bind_framebuffer(&mut self, target: GLenum, framebuffer: GLuint) {
        self.post("bindFramebuffer", args![target, framebuffer]);
        if target == gl::FRAMEBUFFER {
            self.state
                .record_binding(BindingSlot::DrawFramebuffer, framebuffer);
        }
    }

    pub fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        self.post("bindRenderbuffer", args![target, renderbuffer]);
    }

    pub fn bind_texture(&mut self, target: GLenum, texture: GLuint) {
        self.post("bindTexture", args![target, texture]);
        if target == gl::TEXTURE_2D {
            self.state.record_binding(BindingSlot::Texture2D, texture);
        }
    }

    pub fn blend_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        self.post("blendColor", args![red, green, blue, alpha]);
    }

    pub fn blend_equation(&self, mode: GLenum) {
        self.post("blendEquation", args![mode]);
    }

    pub fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum) {
        self.post("blendEquationSeparate", args![mode_rgb, mode_alpha]);
    }

    pub fn blend_func(&self, sfactor: GLenum, dfactor: GLenum) {
        self.post("blendFunc", args![sfactor, dfactor]);
    }

    pub fn blend_func_separate(
        &self,
        sfactor_rgb: GLenum,
        dfactor_rgb: GLenum,
        sfactor_alpha: GLenum,
        dfactor_alpha: GLenum,
    ) {
        self.post(
            "blendFuncSeparate",
            args![sfactor_rgb, dfactor_rgb, sfactor_alpha, dfactor_alpha],
        );
    }

    /// `data` of `None` allocates `size` uninitialized bytes
    pub fn buffer_data(&self, target: GLenum, size: GLsizei, data: Option<&[u8]>, usage: GLenum) {
        let data = data.map(|data| self.client_bytes("bufferData", data, len_of(size, 1)));
        self.post("bufferData", args![target, usage, size, data]);
    }

    pub fn buffer_sub_data(&self, target: GLenum, offset: GLint, data: &[u8]) {
        self.post(
            "bufferSubData",
            args![target, as_glint(data.len()), offset, data],
        );
    }

    pub fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        self.query_as("checkFramebufferStatus", 0, args![target])
    }

    pub fn clear(&self, mask: GLbitfield) {
        self.post("clear", args![mask]);
    }

    pub fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        self.post("clearColor", args![red, green, blue, alpha]);
    }

    pub fn clear_depthf(&self, depth: GLfloat) {
        self.post("clearDepthf", args![depth]);
    }

    pub fn clear_stencil(&self, s: GLint) {
        self.post("clearStencil", args![s]);
    }

    pub fn color_mask(&self, red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean) {
        self.post("colorMask", args![red, green, blue, alpha]);
    }

    pub fn compile_shader(&self, shader: GLuint) {
        self.post("compileShader", args![shader]);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn compressed_tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        data: &[u8],
    ) {
        self.post(
            "compressedTexImage2D",
            args![
                target,
                level,
                internalformat,
                width,
                height,
                border,
                as_glint(data.len()),
                data
            ],
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn compressed_tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        data: &[u8],
    ) {
        self.post(
            "compressedTexSubImage2D",
            args![
                target,
                level,
                xoffset,
                yoffset,
                width,
                height,
                format,
                as_glint(data.len()),
                data
            ],
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn copy_tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internalformat: GLenum,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
    ) {
        self.post(
            "copyTexImage2D",
            args![target, level, internalformat, x, y, width, height, border],
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn copy_tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.post(
            "copyTexSubImage2D",
            args![target, level, xoffset, yoffset, x, y, width, height],
        );
    }

    pub fn create_program(&self) -> GLuint {
        self.query_as("createProgram", 0, args![])
    }

    pub fn create_shader(&self, type_: GLenum) -> GLuint {
        self.query_as("createShader", 0, args![type_])
    }

    pub fn cull_face(&self, mode: GLenum) {
        self.post("cullFace", args![mode]);
    }

    pub fn delete_buffers(&mut self, buffers: &[GLuint]) {
        self.post_names("deleteBuffers", buffers);
        for buffer in buffers {
            self.state.clear_binding(
                &[BindingSlot::ArrayBuffer, BindingSlot::ElementArrayBuffer],
                *buffer,
            );
        }
    }

    pub fn delete_framebuffers(&mut self, framebuffers: &[GLuint]) {
        self.post_names("deleteFramebuffers", framebuffers);
        for framebuffer in framebuffers {
            self.state
                .clear_binding(&[BindingSlot::DrawFramebuffer], *framebuffer);
        }
    }

    pub fn delete_program(&self, program: GLuint) {
        self.post("deleteProgram", args![program]);
    }

    pub fn delete_renderbuffers(&self, renderbuffers: &[GLuint]) {
        self.post_names("deleteRenderbuffers", renderbuffers);
    }

    pub fn delete_shader(&self, shader: GLuint) {
        self.post("deleteShader", args![shader]);
    }

    pub fn delete_textures(&mut self, textures: &[GLuint]) {
        self.post_names("deleteTextures", textures);
        for texture in textures {
            self.state.clear_binding(&[BindingSlot::Texture2D], *texture);
        }
    }

    pub fn depth_func(&self, func: GLenum) {
        self.post("depthFunc", args![func]);
    }

    pub fn depth_mask(&self, flag: GLboolean) {
        self.post("depthMask", args![flag]);
    }

    pub fn depth_rangef(&self, near: GLfloat, far: GLfloat) {
        self.post("depthRangef", args![near, far]);
    }

    pub fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.post("detachShader", args![program, shader]);
    }

    pub fn disable_vertex_attrib_array(&mut self, index: GLuint) {
        self.post("disableVertexAttribArray", args![index]);
        self.state.vertex_attrib_mut(index).enabled = false;
    }

    /// Client-side attributes travel with the draw, starting from vertex 0
    /// rather than `first`
    pub fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        let Some(mut envelope) = self.envelope("drawArrays", false) else {
            return;
        };
        envelope.extend(args![mode, first, count]);
        self.push_client_attribs(&mut envelope, first.saturating_add(count));
        self.registry.post(envelope);
    }

    pub fn draw_elements(&self, mode: GLenum, count: GLsizei, type_: GLenum, indices: IndexSource) {
        let Some(mut envelope) = self.envelope("drawElements", false) else {
            return;
        };
        envelope.extend(args![mode, count, type_]);
        self.push_client_attribs(&mut envelope, count);

        if self.state.binding(BindingSlot::ElementArrayBuffer) == 0 {
            let data = match indices {
                IndexSource::Client(data) => {
                    self.client_bytes("drawElements", data, len_of(count, element_size(type_)))
                }
                IndexSource::Offset(offset) => {
                    warn!(
                        "drawElements: offset {} given without an element array buffer",
                        offset
                    );
                    Vec::new()
                }
            };
            envelope.extend(args![0, data]);
        } else {
            let offset = match indices {
                IndexSource::Offset(offset) => offset,
                IndexSource::Client(_) => {
                    warn!("drawElements: client indices ignored while an element array buffer is bound");
                    0
                }
            };
            envelope.extend(args![1, offset]);
        }
        self.registry.post(envelope);
    }

    pub fn enable_vertex_attrib_array(&mut self, index: GLuint) {
        self.post("enableVertexAttribArray", args![index]);
        self.state.vertex_attrib_mut(index).enabled = true;
    }

    pub fn finish(&self) {
        self.post("finish", args![]);
    }

    pub fn flush(&self) {
        self.post("flush", args![]);
    }

    pub fn framebuffer_renderbuffer(
        &self,
        target: GLenum,
        attachment: GLenum,
        renderbuffertarget: GLenum,
        renderbuffer: GLuint,
    ) {
        self.post(
            "framebufferRenderbuffer",
            args![target, attachment, renderbuffertarget, renderbuffer],
        );
    }

    pub fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
    ) {
        self.post(
            "framebufferTexture2D",
            args![target, attachment, textarget, texture, level],
        );
    }

    pub fn front_face(&self, mode: GLenum) {
        self.post("frontFace", args![mode]);
    }

    pub fn gen_buffers(&self, buffers: &mut [GLuint]) -> usize {
        self.gen_names("genBuffers", buffers)
    }

    pub fn gen_framebuffers(&self, framebuffers: &mut [GLuint]) -> usize {
        self.gen_names("genFramebuffers", framebuffers)
    }

    pub fn gen_renderbuffers(&self, renderbuffers: &mut [GLuint]) -> usize {
        self.gen_names("genRenderbuffers", renderbuffers)
    }

    pub fn gen_textures(&self, textures: &mut [GLuint]) -> usize {
        self.gen_names("genTextures", textures)
    }

    pub fn generate_mipmap(&self, target: GLenum) {
        self.post("generateMipmap", args![target]);
    }

    /// The name is cut to `buf_size - 1` bytes, leaving room for a terminator
    pub fn get_active_attrib(
        &self,
        program: GLuint,
        index: GLuint,
        buf_size: GLsizei,
    ) -> Option<ActiveInfo> {
        self.active_info("getActiveAttrib", program, index, buf_size)
    }

    pub fn get_active_uniform(
        &self,
        program: GLuint,
        index: GLuint,
        buf_size: GLsizei,
    ) -> Option<ActiveInfo> {
        self.active_info("getActiveUniform", program, index, buf_size)
    }

    pub fn get_attached_shaders(&self, program: GLuint, shaders: &mut [GLuint]) -> usize {
        let values = self.query_as::<Vec<Value>>(
            "getAttachedShaders",
            Vec::new(),
            args![program, as_glint(shaders.len())],
        );
        for (slot, value) in shaders.iter_mut().zip(&values) {
            *slot = convert_or(value, 0);
        }
        values.len().min(shaders.len())
    }

    pub fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        self.query_as("getAttribLocation", -1, args![program, name])
    }

    pub fn get_string(&self, name: GLenum) -> String {
        if let Some(cached) = self.state.cached(name) {
            return convert_or(cached, String::new());
        }
        self.query_as("getString", String::new(), args![name])
    }

    /// Every integer making up `pname`: one for most names, four for
    /// `VIEWPORT`. Answered locally when the name is capped, a tracked
    /// binding or snapshotted.
    pub fn get_integerv(&self, pname: GLenum) -> Vec<GLint> {
        if pname == gl::MAX_TEXTURE_SIZE {
            return vec![self.registry.config().max_texture_size];
        }
        if let Some(slot) = BindingSlot::for_parameter(pname) {
            return vec![self.state.binding(slot) as GLint];
        }
        if let Some(cached) = self.state.cached(pname) {
            return cached
                .elements()
                .into_iter()
                .map(|value| match value.get::<GLint>() {
                    Some(integer) => integer,
                    None => {
                        warn!("Failed to cast {} to an integer", value.kind());
                        0
                    }
                })
                .collect();
        }
        vec![self.query_as("getIntegerv", 0, args![pname])]
    }

    pub fn get_booleanv(&self, pname: GLenum) -> GLboolean {
        if let Some(cached) = self.state.cached(pname) {
            return convert_or(cached, false);
        }
        self.query_as("getBooleanv", false, args![pname])
    }

    pub fn enable(&mut self, cap: GLenum) {
        if self.post("enable", args![cap]) {
            self.state.set_cached_flag(cap, true);
        }
    }

    pub fn disable(&mut self, cap: GLenum) {
        if self.post("disable", args![cap]) {
            self.state.set_cached_flag(cap, false);
        }
    }

    pub fn get_buffer_parameteriv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.query_as("getBufferParameteriv", 0, args![target, pname])
    }

    pub fn get_error(&self) -> GLenum {
        self.query_as("getError", gl::NO_ERROR, args![])
    }

    /// Remotely this is `getParameter`
    pub fn get_floatv(&self, pname: GLenum) -> GLfloat {
        self.query_as("getParameter", 0.0, args![pname])
    }

    pub fn get_framebuffer_attachment_parameteriv(
        &self,
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
    ) -> GLint {
        self.query_as(
            "getFramebufferAttachmentParameteriv",
            0,
            args![target, attachment, pname],
        )
    }

    /// Cut to `buf_size - 1` bytes, like every string query
    pub fn get_program_info_log(&self, program: GLuint, buf_size: GLsizei) -> String {
        fit_to_buffer(
            self.object_text("getProgramInfoLog", program, buf_size),
            buf_size,
        )
    }

    pub fn get_programiv(&self, program: GLuint, pname: GLenum) -> GLint {
        self.query_as("getProgramiv", 0, args![program, pname])
    }

    pub fn get_renderbuffer_parameteriv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.query_as("getRenderbufferParameteriv", 0, args![target, pname])
    }

    pub fn get_shader_info_log(&self, shader: GLuint, buf_size: GLsizei) -> String {
        fit_to_buffer(
            self.object_text("getShaderInfoLog", shader, buf_size),
            buf_size,
        )
    }

    pub fn get_shader_precision_format(
        &self,
        shadertype: GLenum,
        precisiontype: GLenum,
    ) -> ShaderPrecision {
        let values = self.query_as::<std::collections::BTreeMap<String, Value>>(
            "getShaderPrecisionFormat",
            Default::default(),
            args![shadertype, precisiontype],
        );
        let field = |key: &str| match values.get(key).and_then(Value::get::<GLint>) {
            Some(value) => value,
            None => {
                error!("Invalid {} value", key);
                0
            }
        };
        ShaderPrecision {
            range_min: field("rangeMin"),
            range_max: field("rangeMax"),
            precision: field("precision"),
        }
    }

    pub fn get_shader_source(&self, shader: GLuint, buf_size: GLsizei) -> String {
        fit_to_buffer(
            self.object_text("getShaderSource", shader, buf_size),
            buf_size,
        )
    }

    /// `INFO_LOG_LENGTH` and `SHADER_SOURCE_LENGTH` are measured from the log
    /// and source themselves
    pub fn get_shaderiv(&self, shader: GLuint, pname: GLenum) -> GLint {
        match pname {
            gl::INFO_LOG_LENGTH => as_glint(self.object_text("getShaderInfoLog", shader, 0).len()),
            gl::SHADER_SOURCE_LENGTH => {
                as_glint(self.object_text("getShaderSource", shader, 0).len())
            }
            _ => self.query_as("getShaderiv", 0, args![shader, pname]),
        }
    }

    pub fn get_tex_parameterfv(&self, target: GLenum, pname: GLenum) -> GLfloat {
        self.query_as("getTexParameterfv", 0.0, args![target, pname])
    }

    pub fn get_tex_parameteriv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.query_as("getTexParameteriv", 0, args![target, pname])
    }

    pub fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        self.query_as("getUniformLocation", -1, args![program, name])
    }

    pub fn get_uniformfv(&self, program: GLuint, location: GLint) -> GLfloat {
        self.query_as("getUniformfv", 0.0, args![program, location])
    }

    pub fn get_uniformiv(&self, program: GLuint, location: GLint) -> GLint {
        self.query_as("getUniformiv", 0, args![program, location])
    }

    /// Client pointers never cross to the renderer, so they cannot be read back
    pub fn get_vertex_attrib_pointerv(&self, _index: GLuint, _pname: GLenum) -> ! {
        panic!("glGetVertexAttribPointerv is not supported by the remote renderer");
    }

    pub fn get_vertex_attribfv(&self, index: GLuint, pname: GLenum) -> GLfloat {
        self.query_as("getVertexAttribfv", 0.0, args![index, pname])
    }

    pub fn get_vertex_attribiv(&self, index: GLuint, pname: GLenum) -> GLint {
        self.query_as("getVertexAttribiv", 0, args![index, pname])
    }

    pub fn hint(&self, target: GLenum, mode: GLenum) {
        self.post("hint", args![target, mode]);
    }

    pub fn is_buffer(&self, buffer: GLuint) -> GLboolean {
        self.query_as("isBuffer", false, args![buffer])
    }

    pub fn is_enabled(&self, cap: GLenum) -> GLboolean {
        if let Some(cached) = self.state.cached(cap) {
            return convert_or(cached, false);
        }
        self.query_as("isEnabled", false, args![cap])
    }

    pub fn is_framebuffer(&self, framebuffer: GLuint) -> GLboolean {
        self.query_as("isFramebuffer", false, args![framebuffer])
    }

    pub fn is_program(&self, program: GLuint) -> GLboolean {
        self.query_as("isProgram", false, args![program])
    }

    pub fn is_renderbuffer(&self, renderbuffer: GLuint) -> GLboolean {
        self.query_as("isRenderbuffer", false, args![renderbuffer])
    }

    pub fn is_shader(&self, shader: GLuint) -> GLboolean {
        self.query_as("isShader", false, args![shader])
    }

    pub fn is_texture(&self, texture: GLuint) -> GLboolean {
        self.query_as("isTexture", false, args![texture])
    }

    pub fn line_width(&self, width: GLfloat) {
        self.post("lineWidth", args![width]);
    }

    pub fn link_program(&self, program: GLuint) {
        self.post("linkProgram", args![program]);
    }

    pub fn pixel_storei(&mut self, pname: GLenum, param: GLint) {
        self.post("pixelStorei", args![pname, param]);
        if pname == gl::UNPACK_ALIGNMENT {
            self.state
                .record_binding(BindingSlot::UnpackAlignment, param as GLuint);
            self.state
                .update_cached(gl::UNPACK_ALIGNMENT, Value::Int(param));
        }
    }

    pub fn polygon_offset(&self, factor: GLfloat, units: GLfloat) {
        self.post("polygonOffset", args![factor, units]);
    }

    /// Copies the pixels received into `pixels` and returns how many bytes
    /// were written
    #[allow(clippy::too_many_arguments)]
    pub fn read_pixels(
        &self,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: &mut [u8],
    ) -> usize {
        let data = self.query_as::<Vec<u8>>(
            "readPixels",
            Vec::new(),
            args![x, y, width, height, format, type_],
        );
        let len = data.len().min(pixels.len());
        if len < data.len() {
            warn!(
                "readPixels: {} bytes received, room for {}",
                data.len(),
                pixels.len()
            );
        }
        pixels[..len].copy_from_slice(&data[..len]);
        len
    }

    pub fn release_shader_compiler(&self) {
        self.post("releaseShaderCompiler", args![]);
    }

    pub fn renderbuffer_storage(
        &self,
        target: GLenum,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.post(
            "renderbufferStorage",
            args![target, internalformat, width, height],
        );
    }

    pub fn sample_coverage(&self, value: GLfloat, invert: GLboolean) {
        self.post("sampleCoverage", args![value, invert]);
    }

    pub fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.post("scissor", args![x, y, width, height]);
    }

    pub fn shader_binary(&self, _shaders: &[GLuint], _binaryformat: GLenum, _binary: &[u8]) -> ! {
        panic!("The remote renderer does not accept precompiled shaders");
    }

    /// Each element of `sources` is sent as one string
    pub fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        let mut arguments = args![shader, as_glint(sources.len())];
        arguments.extend(sources.iter().map(|source| Value::from(*source)));
        self.post("shaderSource", arguments);
    }

    pub fn stencil_func(&self, func: GLenum, reference: GLint, mask: GLuint) {
        self.post("stencilFunc", args![func, reference, mask]);
    }

    pub fn stencil_func_separate(&self, face: GLenum, func: GLenum, reference: GLint, mask: GLuint) {
        self.post("stencilFuncSeparate", args![face, func, reference, mask]);
    }

    pub fn stencil_mask(&self, mask: GLuint) {
        self.post("stencilMask", args![mask]);
    }

    pub fn stencil_mask_separate(&self, face: GLenum, mask: GLuint) {
        self.post("stencilMaskSeparate", args![face, mask]);
    }

    pub fn stencil_op(&self, fail: GLenum, zfail: GLenum, zpass: GLenum) {
        self.post("stencilOp", args![fail, zfail, zpass]);
    }

    pub fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        self.post("stencilOpSeparate", args![face, sfail, dpfail, dppass]);
    }

    /// `pixels` of `None` allocates the texture without uploading data
    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: Option<&[u8]>,
    ) {
        let pixels = pixels.map(|pixels| {
            self.client_bytes(
                "texImage2D",
                pixels,
                image_size(width, height, format, type_),
            )
        });
        self.post(
            "texImage2D",
            args![target, level, internalformat, width, height, border, format, type_, pixels],
        );
    }

    pub fn tex_parameterf(&self, target: GLenum, pname: GLenum, param: GLfloat) {
        self.post("texParameterf", args![target, pname, param]);
    }

    /// Only single-valued parameters exist, so the first element is sent as
    /// `texParameterf`
    pub fn tex_parameterfv(&self, target: GLenum, pname: GLenum, params: &[GLfloat]) {
        match params.first() {
            Some(param) => self.tex_parameterf(target, pname, *param),
            None => warn!("texParameterfv called without values"),
        }
    }

    pub fn tex_parameteri(&self, target: GLenum, pname: GLenum, param: GLint) {
        self.post("texParameteri", args![target, pname, param]);
    }

    pub fn tex_parameteriv(&self, target: GLenum, pname: GLenum, params: &[GLint]) {
        match params.first() {
            Some(param) => self.tex_parameteri(target, pname, *param),
            None => warn!("texParameteriv called without values"),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: Option<&[u8]>,
    ) {
        let pixels = pixels.map(|pixels| {
            self.client_bytes(
                "texSubImage2D",
                pixels,
                image_size(width, height, format, type_),
            )
        });
        self.post(
            "texSubImage2D",
            args![target, level, xoffset, yoffset, width, height, format, type_, pixels],
        );
    }

    // Uniforms

    pub fn uniform1f(&self, location: GLint, v0: GLfloat) {
        self.post("uniform1f", args![location, v0]);
    }

    pub fn uniform1fv(&self, location: GLint, count: GLsizei, value: &[GLfloat]) {
        self.post_array("uniform1fv", args![location, count], value, len_of(count, 1));
    }

    pub fn uniform1i(&self, location: GLint, v0: GLint) {
        self.post("uniform1i", args![location, v0]);
    }

    pub fn uniform1iv(&self, location: GLint, count: GLsizei, value: &[GLint]) {
        self.post_array("uniform1iv", args![location, count], value, len_of(count, 1));
    }

    pub fn uniform2f(&self, location: GLint, v0: GLfloat, v1: GLfloat) {
        self.post("uniform2f", args![location, v0, v1]);
    }

    pub fn uniform2fv(&self, location: GLint, count: GLsizei, value: &[GLfloat]) {
        self.post_array("uniform2fv", args![location, count], value, len_of(count, 2));
    }

    pub fn uniform2i(&self, location: GLint, v0: GLint, v1: GLint) {
        self.post("uniform2i", args![location, v0, v1]);
    }

    pub fn uniform2iv(&self, location: GLint, count: GLsizei, value: &[GLint]) {
        self.post_array("uniform2iv", args![location, count], value, len_of(count, 2));
    }

    pub fn uniform3f(&self, location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat) {
        self.post("uniform3f", args![location, v0, v1, v2]);
    }

    pub fn uniform3fv(&self, location: GLint, count: GLsizei, value: &[GLfloat]) {
        self.post_array("uniform3fv", args![location, count], value, len_of(count, 3));
    }

    pub fn uniform3i(&self, location: GLint, v0: GLint, v1: GLint, v2: GLint) {
        self.post("uniform3i", args![location, v0, v1, v2]);
    }

    pub fn uniform3iv(&self, location: GLint, count: GLsizei, value: &[GLint]) {
        self.post_array("uniform3iv", args![location, count], value, len_of(count, 3));
    }

    pub fn uniform4f(&self, location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat, v3: GLfloat) {
        self.post("uniform4f", args![location, v0, v1, v2, v3]);
    }

    pub fn uniform4fv(&self, location: GLint, count: GLsizei, value: &[GLfloat]) {
        self.post_array("uniform4fv", args![location, count], value, len_of(count, 4));
    }

    pub fn uniform4i(&self, location: GLint, v0: GLint, v1: GLint, v2: GLint, v3: GLint) {
        self.post("uniform4i", args![location, v0, v1, v2, v3]);
    }

    pub fn uniform4iv(&self, location: GLint, count: GLsizei, value: &[GLint]) {
        self.post_array("uniform4iv", args![location, count], value, len_of(count, 4));
    }

    pub fn uniform_matrix2fv(
        &self,
        location: GLint,
        count: GLsizei,
        transpose: GLboolean,
        value: &[GLfloat],
    ) {
        self.post_array(
            "uniformMatrix2fv",
            args![location, count, transpose],
            value,
            len_of(count, 4),
        );
    }

    pub fn uniform_matrix3fv(
        &self,
        location: GLint,
        count: GLsizei,
        transpose: GLboolean,
        value: &[GLfloat],
    ) {
        self.post_array(
            "uniformMatrix3fv",
            args![location, count, transpose],
            value,
            len_of(count, 9),
        );
    }

    pub fn uniform_matrix4fv(
        &self,
        location: GLint,
        count: GLsizei,
        transpose: GLboolean,
        value: &[GLfloat],
    ) {
        self.post_array(
            "uniformMatrix4fv",
            args![location, count, transpose],
            value,
            len_of(count, 16),
        );
    }

    pub fn use_program(&mut self, program: GLuint) {
        self.post("useProgram", args![program]);
        self.state
            .record_binding(BindingSlot::CurrentProgram, program);
    }

    pub fn validate_program(&self, program: GLuint) {
        self.post("validateProgram", args![program]);
    }

    // Generic vertex attributes

    pub fn vertex_attrib1f(&self, index: GLuint, x: GLfloat) {
        self.post("vertexAttrib1f", args![index, x]);
    }

    pub fn vertex_attrib1fv(&self, index: GLuint, v: &[GLfloat; 1]) {
        self.post("vertexAttrib1fv", args![index, v[0]]);
    }

    pub fn vertex_attrib2f(&self, index: GLuint, x: GLfloat, y: GLfloat) {
        self.post("vertexAttrib2f", args![index, x, y]);
    }

    pub fn vertex_attrib2fv(&self, index: GLuint, v: &[GLfloat; 2]) {
        self.post("vertexAttrib2fv", args![index, v[0], v[1]]);
    }

    pub fn vertex_attrib3f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat) {
        self.post("vertexAttrib3f", args![index, x, y, z]);
    }

    pub fn vertex_attrib3fv(&self, index: GLuint, v: &[GLfloat; 3]) {
        self.post("vertexAttrib3fv", args![index, v[0], v[1], v[2]]);
    }

    pub fn vertex_attrib4f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        self.post("vertexAttrib4f", args![index, x, y, z, w]);
    }

    pub fn vertex_attrib4fv(&self, index: GLuint, v: &[GLfloat; 4]) {
        self.post("vertexAttrib4fv", args![index, v[0], v[1], v[2], v[3]]);
    }

    /// Records the attribute's format and source. Only attributes backed by
    /// an array buffer are forwarded now; client-side data is copied here and
    /// embedded in later draw calls.
    pub fn vertex_attrib_pointer(
        &mut self,
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: VertexPointer,
    ) {
        let buffer = self.state.binding(BindingSlot::ArrayBuffer);
        let source = if buffer == 0 {
            match pointer {
                VertexPointer::Client(data) => VertexSource::Client(data.to_vec()),
                VertexPointer::Offset(offset) => {
                    warn!(
                        "vertexAttribPointer: offset {} given without an array buffer",
                        offset
                    );
                    VertexSource::Client(Vec::new())
                }
            }
        } else {
            let offset = match pointer {
                VertexPointer::Offset(offset) => offset,
                VertexPointer::Client(_) => {
                    warn!("vertexAttribPointer: client data ignored while an array buffer is bound");
                    0
                }
            };
            VertexSource::Buffer { buffer, offset }
        };

        let attrib = self.state.vertex_attrib_mut(index);
        attrib.size = size;
        attrib.type_ = type_;
        attrib.normalized = normalized;
        attrib.stride = stride;
        attrib.source = Some(source.clone());

        if let VertexSource::Buffer { offset, .. } = source {
            self.post(
                "vertexAttribPointer",
                args![index, size, type_, normalized, stride, offset],
            );
        }
    }

    pub fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.post("viewport", args![x, y, width, height]);
        self.state
            .update_cached(gl::VIEWPORT, Value::List(args![x, y, width, height]));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn blit_framebuffer_ext(
        &self,
        src_x0: GLint,
        src_y0: GLint,
        src_x1: GLint,
        src_y1: GLint,
        dst_x0: GLint,
        dst_y0: GLint,
        dst_x1: GLint,
        dst_y1: GLint,
        mask: GLbitfield,
        filter: GLenum,
    ) {
        self.post(
            "blitFramebufferEXT",
            args![src_x0, src_y0, src_x1, src_y1, dst_x0, dst_y0, dst_x1, dst_y1, mask, filter],
        );
    }

    pub fn renderbuffer_storage_multisample_ext(
        &self,
        target: GLenum,
        samples: GLsizei,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.post(
            "renderbufferStorageMultisampleEXT",
            args![target, samples, internalformat, width, height],
        );
    }

    pub fn get_tex_level_parameteriv(&self, _target: GLenum, _level: GLint, _pname: GLenum) -> ! {
        panic!("glGetTexLevelParameteriv is not supported by the remote renderer");
    }
}
