use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{
    protocol::error::ProtocolError,
    types::{CorrelationId, GLenum, SurfaceId},
    value::Value,
};

/// Host details reported to the renderer on connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SysInfo {
    pub kernel_type: String,
    pub build_cpu_architecture: String,
    pub product_type: String,
}

impl SysInfo {
    pub fn current() -> Self {
        Self {
            kernel_type: std::env::consts::OS.to_string(),
            build_cpu_architecture: std::env::consts::ARCH.to_string(),
            product_type: std::env::consts::FAMILY.to_string(),
        }
    }
}

/// Control messages sent from the host to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Connect {
        debug: bool,
        loading_screen: Option<String>,
        sysinfo: SysInfo,
        supported_functions: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    CreateCanvas {
        win_id: SurfaceId,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        title: String,
    },
    #[serde(rename_all = "camelCase")]
    DestroyCanvas { win_id: SurfaceId },
    OpenUrl { url: String },
    #[serde(rename_all = "camelCase")]
    ChangeTitle { win_id: SurfaceId, title: String },
    ChangeCursor { cursor: i32 },
}

impl ServerMessage {
    pub fn type_name(&self) -> &'static str {
        match self {
            ServerMessage::Connect { .. } => "connect",
            ServerMessage::CreateCanvas { .. } => "create_canvas",
            ServerMessage::DestroyCanvas { .. } => "destroy_canvas",
            ServerMessage::OpenUrl { .. } => "open_url",
            ServerMessage::ChangeTitle { .. } => "change_title",
            ServerMessage::ChangeCursor { .. } => "change_cursor",
        }
    }

    pub fn to_json(&self) -> String {
        // every field is a plain string, number, bool or list of strings
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(|error| ProtocolError::MalformedJson {
            reason: error.to_string(),
        })
    }
}

/// Screen geometry sent by the renderer when it connects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub width: i32,
    pub height: i32,
    pub physical_width: f64,
    pub physical_height: f64,
}

/// Input events are forwarded to the host without interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Mouse,
    Wheel,
    Touch,
    KeyDown,
    KeyUp,
}

impl InputKind {
    fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "mouse" => Some(InputKind::Mouse),
            "wheel" => Some(InputKind::Wheel),
            "touch" => Some(InputKind::Touch),
            "keydown" => Some(InputKind::KeyDown),
            "keyup" => Some(InputKind::KeyUp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Mouse => "mouse",
            InputKind::Wheel => "wheel",
            InputKind::Touch => "touch",
            InputKind::KeyDown => "keydown",
            InputKind::KeyUp => "keyup",
        }
    }
}

/// Control messages received from the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Connect(ScreenInfo),
    GlResponse {
        id: CorrelationId,
        value: Value,
    },
    DefaultContextParameters {
        surface: SurfaceId,
        parameters: BTreeMap<GLenum, Value>,
    },
    CanvasResize {
        surface: SurfaceId,
        width: i32,
        height: i32,
    },
    Input {
        kind: InputKind,
        surface: Option<SurfaceId>,
        payload: JsonValue,
    },
}

#[derive(Deserialize)]
struct GlResponseFields {
    id: CorrelationId,
    #[serde(default)]
    value: JsonValue,
}

#[derive(Deserialize)]
struct CanvasResizeFields {
    width: i32,
    height: i32,
}

impl ClientMessage {
    /// Parse one text message. The renderer identifies canvases through a
    /// `name` field holding the winId, as a number or a numeric string.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let json: JsonValue =
            serde_json::from_str(text).map_err(|error| ProtocolError::MalformedJson {
                reason: error.to_string(),
            })?;
        let JsonValue::Object(mut object) = json else {
            return Err(ProtocolError::MalformedJson {
                reason: "top level value is not an object".to_string(),
            });
        };
        let kind = match object.remove("type") {
            Some(JsonValue::String(kind)) => kind,
            _ => return Err(ProtocolError::MissingType),
        };

        match kind.as_str() {
            "connect" => {
                let info = fields::<ScreenInfo>("connect", object)?;
                Ok(ClientMessage::Connect(info))
            }
            "gl_response" => {
                let response = fields::<GlResponseFields>("gl_response", object)?;
                Ok(ClientMessage::GlResponse {
                    id: response.id,
                    value: Value::from(response.value),
                })
            }
            "default_context_parameters" => {
                let surface = surface_field("default_context_parameters", &mut object)?
                    .ok_or(ProtocolError::MissingField {
                        message: "default_context_parameters",
                        field: "name",
                    })?;
                let mut parameters = BTreeMap::new();
                for (key, value) in object {
                    let parameter = key
                        .parse::<GLenum>()
                        .map_err(|_| ProtocolError::InvalidParameterKey { key: key.clone() })?;
                    parameters.insert(parameter, Value::from(value));
                }
                Ok(ClientMessage::DefaultContextParameters {
                    surface,
                    parameters,
                })
            }
            "canvas_resize" => {
                let surface = surface_field("canvas_resize", &mut object)?.ok_or(
                    ProtocolError::MissingField {
                        message: "canvas_resize",
                        field: "name",
                    },
                )?;
                let size = fields::<CanvasResizeFields>("canvas_resize", object)?;
                Ok(ClientMessage::CanvasResize {
                    surface,
                    width: size.width,
                    height: size.height,
                })
            }
            other => match InputKind::from_type(other) {
                Some(input) => {
                    let surface = surface_field(input.as_str(), &mut object).unwrap_or(None);
                    Ok(ClientMessage::Input {
                        kind: input,
                        surface,
                        payload: JsonValue::Object(object),
                    })
                }
                None => Err(ProtocolError::UnknownType {
                    kind: other.to_string(),
                }),
            },
        }
    }
}

fn fields<T: for<'de> Deserialize<'de>>(
    message: &'static str,
    object: Map<String, JsonValue>,
) -> Result<T, ProtocolError> {
    serde_json::from_value(JsonValue::Object(object)).map_err(|error| {
        ProtocolError::InvalidField {
            message,
            field: "*",
            reason: error.to_string(),
        }
    })
}

fn surface_field(
    message: &'static str,
    object: &mut Map<String, JsonValue>,
) -> Result<Option<SurfaceId>, ProtocolError> {
    let invalid = |reason: &str| ProtocolError::InvalidField {
        message,
        field: "name",
        reason: reason.to_string(),
    };
    match object.remove("name") {
        None => Ok(None),
        Some(JsonValue::Number(number)) => number
            .as_u64()
            .and_then(|id| SurfaceId::try_from(id).ok())
            .map(Some)
            .ok_or_else(|| invalid("not a u32")),
        Some(JsonValue::String(text)) => text
            .parse::<SurfaceId>()
            .map(Some)
            .map_err(|_| invalid("not a numeric string")),
        Some(_) => Err(invalid("expected a number or string")),
    }
}
