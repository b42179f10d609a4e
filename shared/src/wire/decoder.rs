use crate::{
    protocol::functions::{function_at, RemoteFunction},
    types::{CorrelationId, FunctionIndex},
    value::{Value, ValueKind},
    wire::{constants::CALL_SENTINEL, error::DecodeError},
};

/// Reads big-endian fields from a reassembled call
pub struct CallReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> CallReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.offset,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_be_bytes(self.take_array()?))
    }

    fn read_prefixed(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }

    pub fn read_value(&mut self) -> Result<Value, DecodeError> {
        let tag_offset = self.offset;
        let tag = self.read_u8()?;
        let kind = ValueKind::from_tag(tag).ok_or(DecodeError::UnknownTag {
            tag,
            offset: tag_offset,
        })?;

        let value = match kind {
            ValueKind::Null => Value::Null,
            ValueKind::Int => Value::Int(self.read_i32()?),
            ValueKind::UInt => Value::UInt(self.read_u32()?),
            ValueKind::Bool => Value::Bool(self.read_u8()? != 0),
            ValueKind::Double => Value::Double(self.read_f64()?),
            ValueKind::String => {
                let payload_offset = self.offset;
                let bytes = self.read_prefixed()?;
                let s = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
                    offset: payload_offset,
                })?;
                Value::String(s.to_string())
            }
            ValueKind::Bytes => Value::Bytes(self.read_prefixed()?.to_vec()),
            ValueKind::List | ValueKind::Map => {
                unreachable!("from_tag never yields container kinds")
            }
        };
        Ok(value)
    }
}

/// One call as seen by the remote renderer
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub function_index: FunctionIndex,
    pub correlation_id: Option<CorrelationId>,
    pub arguments: Vec<Value>,
}

impl DecodedCall {
    pub fn function(&self) -> &'static RemoteFunction {
        // decode_call only yields indices present in the list
        &crate::protocol::functions::REMOTE_FUNCTIONS[self.function_index as usize]
    }

    pub fn function_name(&self) -> &'static str {
        self.function().name
    }
}

/// Decode one reassembled call. Whether a correlation id follows the function
/// index is determined by the function list.
pub fn decode_call(bytes: &[u8]) -> Result<DecodedCall, DecodeError> {
    let mut reader = CallReader::new(bytes);

    let function_index = reader.read_u8()?;
    let function = function_at(function_index).ok_or(DecodeError::UnknownFunction {
        index: function_index,
    })?;

    let correlation_id = if function.expects_reply {
        Some(reader.read_u32()?)
    } else {
        None
    };

    let count = reader.read_u32()?;
    // never trust the count for preallocation
    let mut arguments = Vec::with_capacity((count as usize).min(reader.remaining()));
    for _ in 0..count {
        arguments.push(reader.read_value()?);
    }

    let sentinel = reader.read_u32()?;
    if sentinel != CALL_SENTINEL {
        return Err(DecodeError::BadSentinel { found: sentinel });
    }
    if reader.remaining() > 0 {
        return Err(DecodeError::TrailingBytes {
            count: reader.remaining(),
        });
    }

    Ok(DecodedCall {
        function_index,
        correlation_id,
        arguments,
    })
}
