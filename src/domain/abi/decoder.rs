//! Codec seam and decoded call types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TypeDef;
use crate::error::CodecError;

/// A decoded call argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedArg {
    /// Argument name (camelCased)
    pub name: String,
    /// Declared type (e.g., "u32", "Vec<u8>", "Option<AccountId>")
    pub kind: String,
    /// Decoded value
    pub value: Value,
}

/// Result of decoding a call payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedCall {
    /// Qualified method name (e.g., "messages.getValue")
    pub method: String,
    /// Selector as hex string
    pub selector: String,
    /// Decoded arguments, in declaration order
    pub arguments: Vec<DecodedArg>,
}

/// Trait for the chain type codec
///
/// Method descriptors only orchestrate encoding; the byte-level rules live
/// behind this trait so that a different codec can be plugged in.
pub trait TypeCodec: fmt::Debug + Send + Sync {
    /// Coerce `value` into `ty` and append its encoding to `out`
    ///
    /// On error `out` may hold a partial encoding and should be discarded.
    fn encode_value(&self, ty: &TypeDef, value: &Value, out: &mut Vec<u8>)
        -> Result<(), CodecError>;

    /// Decode one value of type `ty`, advancing `input` past it
    fn decode_value(&self, ty: &TypeDef, input: &mut &[u8]) -> Result<Value, CodecError>;
}

/// Format a decoded value for display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) if s.starts_with("0x") && s.is_ascii() => {
            // 0x + 64 hex digits for 32 bytes
            match s.get(..66) {
                Some(head) if s.len() > 66 => {
                    format!("{}… ({} bytes)", head, (s.len() - 2) / 2)
                }
                _ => s.clone(),
            }
        }
        Value::String(s) => {
            if s.chars().count() <= 64 {
                format!("\"{}\"", s)
            } else {
                let head: String = s.chars().take(64).collect();
                format!("\"{}…\" ({} chars)", head, s.chars().count())
            }
        }
        Value::Array(items) => {
            let max_items = 10;
            let shown: Vec<String> = items.iter().take(max_items).map(format_value).collect();
            if items.len() > max_items {
                format!("[{}, …] ({} items)", shown.join(", "), items.len())
            } else {
                format!("[{}]", shown.join(", "))
            }
        }
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}({})", key, format_value(value)))
                .collect();
            fields.join(", ")
        }
        other => other.to_string(),
    }
}
