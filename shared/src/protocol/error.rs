use thiserror::Error;

/// Errors that can occur while parsing messages from the text channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Text was not a JSON object
    #[error("Text message is not valid JSON: {reason}")]
    MalformedJson { reason: String },

    /// JSON object without a string `type` discriminator
    #[error("Text message has no 'type' field")]
    MissingType,

    /// `type` names a message this side does not understand
    #[error("Unknown text message type '{kind}'")]
    UnknownType { kind: String },

    /// A required field is absent
    #[error("'{message}' message is missing required field '{field}'")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },

    /// A field is present but holds the wrong kind of value
    #[error("'{message}' message has an invalid '{field}' field: {reason}")]
    InvalidField {
        message: &'static str,
        field: &'static str,
        reason: String,
    },

    /// A snapshot key that is not a GL enum number
    #[error("Context parameter key '{key}' is not a GL enum value")]
    InvalidParameterKey { key: String },
}
