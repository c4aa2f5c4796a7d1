//! JSON codec for the backing file.
//!
//! The on-disk format is a pretty-printed UTF-8 JSON object with 4-space
//! indentation. Compact output is available as an opt-out for callers that
//! care more about file size than readability.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Encodes and decodes the full storage map.
#[derive(Clone, Debug)]
pub struct JsonCodec {
    pretty: bool,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonCodec {
    /// Pretty-printed JSON, 4-space indentation. The default.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Encode the map to bytes.
    pub fn encode(&self, map: &Map<String, Value>) -> Result<Vec<u8>, serde_json::Error> {
        if self.pretty {
            let mut buf = Vec::with_capacity(128);
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            map.serialize(&mut ser)?;
            Ok(buf)
        } else {
            serde_json::to_vec(map)
        }
    }

    /// Decode bytes back into a map. The top-level value must be a JSON
    /// object; anything else is rejected.
    pub fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>, serde_json::Error> {
        use serde::de::Error as _;

        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(serde_json::Error::custom(format!(
                "expected a top-level JSON object, found {}",
                type_name(&other)
            ))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
