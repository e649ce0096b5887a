//! Call encoding from command-line arguments

use serde_json::Value;

use super::ToolResult;
use crate::domain::abi::{camel_case, CallableMethod, ContractAbi};
use crate::error::Result;

/// Find `deploy` or a message by declared or camelCase name
pub fn resolve_method<'a>(abi: &'a ContractAbi, name: &str) -> Result<&'a CallableMethod> {
    let name = name.trim();
    let name = name.strip_prefix("messages.").unwrap_or(name);
    if name == "deploy" {
        return Ok(abi.deploy());
    }
    abi.message(&camel_case(name))
}

/// Parse one command-line argument into a JSON value
///
/// Integers become numbers (or decimal strings when wider than 64 bits),
/// valid JSON is taken as-is and anything else is a plain string.
pub fn parse_arg(arg: &str) -> Value {
    let trimmed = arg.trim();

    if let Ok(n) = trimmed.parse::<u64>() {
        return Value::from(n);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return Value::String(trimmed.to_string());
    }

    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(arg.to_string()))
}

/// Encode a call and describe the payload
pub fn encode_call(
    abi: &ContractAbi,
    method: &str,
    args: &[String],
    prefixed: bool,
) -> Result<ToolResult> {
    let method = resolve_method(abi, method)?;
    let values: Vec<Value> = args.iter().map(|arg| parse_arg(arg)).collect();
    let payload = method.encode(&values)?;

    let mut result = ToolResult::new("Encode")
        .add("method", method.name())
        .add("selector", method.selector().to_hex());

    result = if prefixed {
        result.add(
            "payload",
            format!("0x{}", hex::encode(payload.length_prefixed())),
        )
    } else {
        result.add("payload", payload.to_hex())
    };

    Ok(result.add("bytes", payload.len().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn abi() -> ContractAbi {
        ContractAbi::new(&json!({
            "deploy": { "name": "new", "selector": "0x5ebd88d6", "args": [{ "name": "init_value", "type": "u32" }] },
            "messages": [
                { "name": "inc", "selector": "0x00000001", "mutates": true, "args": [{ "name": "by", "type": "i32" }] },
                { "name": "get_value", "selector": "0x00000002", "args": [] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_arg() {
        assert_eq!(parse_arg("5"), json!(5));
        assert_eq!(parse_arg("-5"), json!(-5));
        assert_eq!(
            parse_arg("340282366920938463463374607431768211455"),
            json!("340282366920938463463374607431768211455")
        );
        assert_eq!(parse_arg("true"), json!(true));
        assert_eq!(parse_arg("[1,2]"), json!([1, 2]));
        assert_eq!(parse_arg("0xdead"), json!("0xdead"));
        assert_eq!(parse_arg("hello"), json!("hello"));
        assert_eq!(parse_arg("\"5\""), json!("5"));
    }

    #[test]
    fn test_resolve_method() {
        let abi = abi();
        assert_eq!(resolve_method(&abi, "deploy").unwrap().name(), "deploy");
        assert_eq!(resolve_method(&abi, "get_value").unwrap().name(), "messages.getValue");
        assert_eq!(resolve_method(&abi, "getValue").unwrap().name(), "messages.getValue");
        assert_eq!(resolve_method(&abi, "messages.inc").unwrap().name(), "messages.inc");
        assert!(matches!(
            resolve_method(&abi, "flip"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_encode_call() {
        let abi = abi();
        let result = encode_call(&abi, "inc", &["-1".to_string()], false).unwrap();
        let payload = &result.content[2];
        assert_eq!(payload.0, "payload");
        assert_eq!(payload.1, "0x00000001ffffffff");

        let result = encode_call(&abi, "get_value", &[], true).unwrap();
        assert_eq!(result.content[2].1, "0x1000000002");
    }

    #[test]
    fn test_argument_count_mismatch() {
        let abi = abi();
        let result = encode_call(&abi, "deploy", &[], false);
        assert!(matches!(result, Err(Error::Arity { expected: 1, found: 0, .. })));
    }
}
