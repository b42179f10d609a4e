use crate::{
    types::{CorrelationId, FunctionIndex},
    value::Value,
    wire::{constants::CALL_SENTINEL, error::EncodeError},
};

/// Appends big-endian fields to a growable buffer
pub struct CallWriter {
    buffer: Vec<u8>,
}

impl CallWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(64),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    fn write_prefixed(&mut self, index: usize, bytes: &[u8]) -> Result<(), EncodeError> {
        let len = u32::try_from(bytes.len()).map_err(|_| EncodeError::PayloadTooLarge {
            index,
            len: bytes.len(),
        })?;
        self.write_u32(len);
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Write one tagged value. `index` is only used for error reporting.
    pub fn write_value(&mut self, index: usize, value: &Value) -> Result<(), EncodeError> {
        let kind = value.kind();
        let tag = kind
            .tag()
            .ok_or(EncodeError::UnsupportedKind { index, kind })?;
        self.write_u8(tag);

        match value {
            Value::Null => {}
            Value::Int(v) => self.write_i32(*v),
            Value::UInt(v) => self.write_u32(*v),
            Value::Bool(v) => self.write_u8(u8::from(*v)),
            Value::Double(v) => self.write_f64(*v),
            Value::String(s) => self.write_prefixed(index, s.as_bytes())?,
            Value::Bytes(bytes) => self.write_prefixed(index, bytes)?,
            Value::List(_) | Value::Map(_) => unreachable!("kinds without a tag are rejected above"),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for CallWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one call:
/// `[function_index:u8][correlation_id:u32]?[argument_count:u32][argument...][sentinel:u32]`
pub fn encode_call(
    function_index: FunctionIndex,
    correlation_id: Option<CorrelationId>,
    arguments: &[Value],
) -> Result<Vec<u8>, EncodeError> {
    let count = u32::try_from(arguments.len()).map_err(|_| EncodeError::TooManyArguments {
        count: arguments.len(),
    })?;

    let mut writer = CallWriter::new();
    writer.write_u8(function_index);
    if let Some(id) = correlation_id {
        writer.write_u32(id);
    }
    writer.write_u32(count);
    for (index, argument) in arguments.iter().enumerate() {
        writer.write_value(index, argument)?;
    }
    writer.write_u32(CALL_SENTINEL);

    Ok(writer.to_bytes())
}
