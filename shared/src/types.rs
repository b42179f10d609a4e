pub type GLenum = u32;
pub type GLint = i32;
pub type GLuint = u32;
pub type GLsizei = i32;
pub type GLfloat = f32;
pub type GLbitfield = u32;
pub type GLboolean = bool;

/// Tag matching a blocking call to the response that answers it
pub type CorrelationId = u32;
/// Position of a function in the remote function list
pub type FunctionIndex = u8;
pub type ContextId = u32;
/// Remote canvas identifier, sent as `winId`
pub type SurfaceId = u32;

