use glrelay_shared::{encode_call, function_index, CorrelationId, SurfaceId, Value};

use crate::error::ProxyError;

/// One remote invocation on its way to the bridge
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub function: &'static str,
    pub surface: SurfaceId,
    pub arguments: Vec<Value>,
    /// Present exactly when the caller waits for a reply
    pub correlation_id: Option<CorrelationId>,
}

impl Envelope {
    pub fn new(
        function: &'static str,
        surface: SurfaceId,
        correlation_id: Option<CorrelationId>,
    ) -> Self {
        Self {
            function,
            surface,
            arguments: Vec::new(),
            correlation_id,
        }
    }

    /// Append one argument.
    ///
    /// Panics if the value has no wire representation: argument kinds are
    /// fixed at every call site, so a list or map here is a programming error.
    pub fn push<V: Into<Value>>(&mut self, value: V) {
        let value = value.into();
        if !value.kind().is_wire_kind() {
            panic!(
                "Cannot pass a {} as an argument to '{}'",
                value.kind(),
                self.function
            );
        }
        self.arguments.push(value);
    }

    pub fn extend<I: IntoIterator<Item = Value>>(&mut self, values: I) {
        for value in values {
            self.push(value);
        }
    }

    pub fn expects_reply(&self) -> bool {
        self.correlation_id.is_some()
    }

    /// Serialize into one binary call
    pub fn encode(&self) -> Result<Vec<u8>, ProxyError> {
        let index = function_index(self.function).ok_or_else(|| ProxyError::UnknownFunction {
            name: self.function.to_string(),
        })?;
        Ok(encode_call(index, self.correlation_id, &self.arguments)?)
    }
}
