mod convert;
mod json;

pub use convert::FromValue;

use std::{collections::BTreeMap, fmt};

/// A single call argument, cached parameter, or decoded response.
///
/// The first seven kinds have a wire tag and may appear as call arguments.
/// `List` and `Map` only occur in responses and cached snapshot values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i32),
    UInt(u32),
    Bool(bool),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Int,
    UInt,
    Bool,
    Double,
    String,
    Bytes,
    List,
    Map,
}

impl ValueKind {
    /// The tag byte identifying this kind on the wire, if it has one
    pub fn tag(self) -> Option<u8> {
        match self {
            ValueKind::Null => Some(b'n'),
            ValueKind::Int => Some(b'i'),
            ValueKind::UInt => Some(b'u'),
            ValueKind::Bool => Some(b'b'),
            ValueKind::Double => Some(b'd'),
            ValueKind::String => Some(b's'),
            ValueKind::Bytes => Some(b'x'),
            ValueKind::List | ValueKind::Map => None,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'n' => Some(ValueKind::Null),
            b'i' => Some(ValueKind::Int),
            b'u' => Some(ValueKind::UInt),
            b'b' => Some(ValueKind::Bool),
            b'd' => Some(ValueKind::Double),
            b's' => Some(ValueKind::String),
            b'x' => Some(ValueKind::Bytes),
            _ => None,
        }
    }

    pub fn is_wire_kind(self) -> bool {
        self.tag().is_some()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Bool => "bool",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::UInt(_) => ValueKind::UInt,
            Value::Bool(_) => ValueKind::Bool,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert to `T`, returning `None` when the kinds are incompatible
    pub fn get<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// The scalar elements of this value: the items of a list, the values of a
    /// map in key order, or the value itself.
    pub fn elements(&self) -> Vec<&Value> {
        match self {
            Value::List(items) => items.iter().collect(),
            Value::Map(map) => map.values().collect(),
            other => vec![other],
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
