//! Payload decoding

use super::ToolResult;
use crate::domain::abi::{format_value, CallPayload, ContractAbi, DecodedCall};
use crate::error::{Error, Result};

/// Parse a `0x`-prefixed (or bare) hex payload
pub fn parse_hex_payload(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(hex_str).map_err(|e| Error::Decode {
        method: "payload".to_string(),
        reason: format!("invalid hex: {}", e),
    })
}

/// Decode a payload as a message call, or as a constructor call when `deploy` is set
pub fn decode_payload(
    abi: &ContractAbi,
    input: &str,
    deploy: bool,
    prefixed: bool,
) -> Result<DecodedCall> {
    let mut bytes = parse_hex_payload(input)?;
    if prefixed {
        bytes = CallPayload::from_length_prefixed(&bytes)
            .map_err(|e| Error::Decode {
                method: "payload".to_string(),
                reason: e.to_string(),
            })?
            .into_bytes();
    }

    if deploy {
        abi.decode_deploy(&bytes)
    } else {
        abi.decode_call(&bytes)
    }
}

/// Describe a decoded call
pub fn decoded_result(call: &DecodedCall) -> ToolResult {
    let mut result = ToolResult::new("Decode")
        .add("method", call.method.clone())
        .add("selector", call.selector.clone());
    for arg in &call.arguments {
        result = result.add(
            format!("{}: {}", arg.name, arg.kind),
            format_value(&arg.value),
        );
    }
    result
}
