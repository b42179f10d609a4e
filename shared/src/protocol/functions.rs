/// One entry of the remote function list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteFunction {
    pub name: &'static str,
    /// Whether the call carries a correlation id and waits for a `gl_response`
    pub expects_reply: bool,
}

const fn call(name: &'static str) -> RemoteFunction {
    RemoteFunction {
        name,
        expects_reply: false,
    }
}

const fn query(name: &'static str) -> RemoteFunction {
    RemoteFunction {
        name,
        expects_reply: true,
    }
}

/// Every function the remote renderer understands. A function's position in
/// this list is its index on the wire, so entries must only ever be appended.
pub const REMOTE_FUNCTIONS: [RemoteFunction; 147] = [
    call("activeTexture"),
    call("attachShader"),
    call("bindAttribLocation"),
    call("bindBuffer"),
    call("bindFramebuffer"),
    call("bindRenderbuffer"),
    call("bindTexture"),
    call("blendColor"),
    call("blendEquation"),
    call("blendEquationSeparate"),
    call("blendFunc"),
    call("blendFuncSeparate"),
    call("bufferData"),
    call("bufferSubData"),
    query("checkFramebufferStatus"),
    call("clear"),
    call("clearColor"),
    call("clearDepthf"),
    call("clearStencil"),
    call("colorMask"),
    call("compileShader"),
    call("compressedTexImage2D"),
    call("compressedTexSubImage2D"),
    call("copyTexImage2D"),
    call("copyTexSubImage2D"),
    query("createProgram"),
    query("createShader"),
    call("cullFace"),
    call("deleteBuffers"),
    call("deleteFramebuffers"),
    call("deleteProgram"),
    call("deleteRenderbuffers"),
    call("deleteShader"),
    call("deleteTextures"),
    call("depthFunc"),
    call("depthMask"),
    call("depthRangef"),
    call("detachShader"),
    call("disableVertexAttribArray"),
    call("drawArrays"),
    call("drawElements"),
    call("enableVertexAttribArray"),
    call("finish"),
    call("flush"),
    call("framebufferRenderbuffer"),
    call("framebufferTexture2D"),
    call("frontFace"),
    query("genBuffers"),
    query("genFramebuffers"),
    query("genRenderbuffers"),
    query("genTextures"),
    call("generateMipmap"),
    query("getActiveAttrib"),
    query("getActiveUniform"),
    query("getAttachedShaders"),
    query("getAttribLocation"),
    query("getString"),
    query("getIntegerv"),
    query("getBooleanv"),
    call("enable"),
    call("disable"),
    query("getBufferParameteriv"),
    query("getError"),
    query("getParameter"),
    query("getFramebufferAttachmentParameteriv"),
    query("getProgramInfoLog"),
    query("getProgramiv"),
    query("getRenderbufferParameteriv"),
    query("getShaderInfoLog"),
    query("getShaderPrecisionFormat"),
    query("getShaderSource"),
    query("getShaderiv"),
    query("getTexParameterfv"),
    query("getTexParameteriv"),
    query("getUniformLocation"),
    query("getUniformfv"),
    query("getUniformiv"),
    call("getVertexAttribPointerv"),
    query("getVertexAttribfv"),
    query("getVertexAttribiv"),
    call("hint"),
    query("isBuffer"),
    query("isEnabled"),
    query("isFramebuffer"),
    query("isProgram"),
    query("isRenderbuffer"),
    query("isShader"),
    query("isTexture"),
    call("lineWidth"),
    call("linkProgram"),
    call("pixelStorei"),
    call("polygonOffset"),
    query("readPixels"),
    call("releaseShaderCompiler"),
    call("renderbufferStorage"),
    call("sampleCoverage"),
    call("scissor"),
    call("shaderBinary"),
    call("shaderSource"),
    call("stencilFunc"),
    call("stencilFuncSeparate"),
    call("stencilMask"),
    call("stencilMaskSeparate"),
    call("stencilOp"),
    call("stencilOpSeparate"),
    call("texImage2D"),
    call("texParameterf"),
    call("texParameterfv"),
    call("texParameteri"),
    call("texParameteriv"),
    call("texSubImage2D"),
    call("uniform1f"),
    call("uniform1fv"),
    call("uniform1i"),
    call("uniform1iv"),
    call("uniform2f"),
    call("uniform2fv"),
    call("uniform2i"),
    call("uniform2iv"),
    call("uniform3f"),
    call("uniform3fv"),
    call("uniform3i"),
    call("uniform3iv"),
    call("uniform4f"),
    call("uniform4fv"),
    call("uniform4i"),
    call("uniform4iv"),
    call("uniformMatrix2fv"),
    call("uniformMatrix3fv"),
    call("uniformMatrix4fv"),
    call("useProgram"),
    call("validateProgram"),
    call("vertexAttrib1f"),
    call("vertexAttrib1fv"),
    call("vertexAttrib2f"),
    call("vertexAttrib2fv"),
    call("vertexAttrib3f"),
    call("vertexAttrib3fv"),
    call("vertexAttrib4f"),
    call("vertexAttrib4fv"),
    call("vertexAttribPointer"),
    call("viewport"),
    call("blitFramebufferEXT"),
    call("renderbufferStorageMultisampleEXT"),
    call("getTexLevelParameteriv"),
    call("makeCurrent"),
    query("swapBuffers"),
];

/// Wire index of the named function
pub fn function_index(name: &str) -> Option<u8> {
    REMOTE_FUNCTIONS
        .iter()
        .position(|function| function.name == name)
        .and_then(|index| u8::try_from(index).ok())
}

pub fn function_at(index: u8) -> Option<&'static RemoteFunction> {
    REMOTE_FUNCTIONS.get(index as usize)
}

pub fn remote_function(name: &str) -> Option<&'static RemoteFunction> {
    REMOTE_FUNCTIONS.iter().find(|function| function.name == name)
}

/// Names in wire order, as advertised in the `connect` message
pub fn supported_functions() -> Vec<String> {
    REMOTE_FUNCTIONS
        .iter()
        .map(|function| function.name.to_string())
        .collect()
}
