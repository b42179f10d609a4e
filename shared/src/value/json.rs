use serde_json::Value as JsonValue;

use super::Value;

// Responses on the text channel are JSON; integral numbers keep the narrowest
// of Int/UInt that fits, everything else becomes a Double.
impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(v) => Value::Bool(v),
            JsonValue::Number(number) => {
                if let Some(v) = number.as_i64().and_then(|v| i32::try_from(v).ok()) {
                    Value::Int(v)
                } else if let Some(v) = number.as_u64().and_then(|v| u32::try_from(v).ok()) {
                    Value::UInt(v)
                } else {
                    Value::Double(number.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
