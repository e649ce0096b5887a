//! JSON value coercion and SCALE encoding

use codec::{Compact, Encode};
use serde_json::Value;

use crate::domain::abi::TypeDef;
use crate::error::CodecError;

type Result<T> = std::result::Result<T, CodecError>;

/// Encode `value` as `ty`, appending to `out`
pub(super) fn encode_value(ty: &TypeDef, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match ty {
        TypeDef::Bool => parse_bool(value)?.encode_to(out),

        TypeDef::U8 => narrow::<u8, _>(parse_unsigned(value)?, ty)?.encode_to(out),
        TypeDef::U16 => narrow::<u16, _>(parse_unsigned(value)?, ty)?.encode_to(out),
        TypeDef::U32 => narrow::<u32, _>(parse_unsigned(value)?, ty)?.encode_to(out),
        TypeDef::U64 => narrow::<u64, _>(parse_unsigned(value)?, ty)?.encode_to(out),
        TypeDef::U128 => parse_unsigned(value)?.encode_to(out),

        TypeDef::I8 => narrow::<i8, _>(parse_signed(value)?, ty)?.encode_to(out),
        TypeDef::I16 => narrow::<i16, _>(parse_signed(value)?, ty)?.encode_to(out),
        TypeDef::I32 => narrow::<i32, _>(parse_signed(value)?, ty)?.encode_to(out),
        TypeDef::I64 => narrow::<i64, _>(parse_signed(value)?, ty)?.encode_to(out),
        TypeDef::I128 => parse_signed(value)?.encode_to(out),

        TypeDef::Compact(inner) => {
            let n = parse_unsigned(value)?;
            // range follows the wrapped integer, encoding follows the value
            match inner.as_ref() {
                TypeDef::U8 => Compact(narrow::<u8, _>(n, inner)?).encode_to(out),
                TypeDef::U16 => Compact(narrow::<u16, _>(n, inner)?).encode_to(out),
                TypeDef::U32 => Compact(narrow::<u32, _>(n, inner)?).encode_to(out),
                TypeDef::U64 => Compact(narrow::<u64, _>(n, inner)?).encode_to(out),
                _ => Compact(n).encode_to(out),
            }
        }

        TypeDef::Str => {
            let s = value
                .as_str()
                .ok_or_else(|| CodecError::new(format!("expected a string, got {}", value)))?;
            s.encode_to(out)
        }

        TypeDef::AccountId | TypeDef::Hash => {
            let bytes = parse_bytes(value)?;
            if bytes.len() != 32 {
                return Err(CodecError::new(format!(
                    "expected 32 bytes, got {}",
                    bytes.len()
                )));
            }
            out.extend_from_slice(&bytes);
        }

        TypeDef::Vec(inner) => {
            if inner.is_byte() && value.is_string() {
                parse_bytes(value)?.encode_to(out);
            } else {
                let items = expect_array(value)?;
                let len = u32::try_from(items.len())
                    .map_err(|_| CodecError::new("sequence too long"))?;
                Compact(len).encode_to(out);
                encode_items(inner, items, out)?;
            }
        }

        TypeDef::Array(inner, len) => {
            if inner.is_byte() && value.is_string() {
                let bytes = parse_bytes(value)?;
                if bytes.len() != *len {
                    return Err(CodecError::new(format!(
                        "expected {} bytes, got {}",
                        len,
                        bytes.len()
                    )));
                }
                out.extend_from_slice(&bytes);
            } else {
                let items = expect_array(value)?;
                if items.len() != *len {
                    return Err(CodecError::new(format!(
                        "expected {} elements, got {}",
                        len,
                        items.len()
                    )));
                }
                encode_items(inner, items, out)?;
            }
        }

        TypeDef::Option(inner) => {
            if value.is_null() {
                out.push(0);
            } else if inner.is_nullable() {
                // Some of a nullable inner value is written `[v]`
                let items = expect_array(value)?;
                let [item] = items else {
                    return Err(CodecError::new(format!(
                        "expected null or a one-element array, got {}",
                        value
                    )));
                };
                out.push(1);
                encode_value(inner, item, out)?;
            } else {
                out.push(1);
                encode_value(inner, value, out)?;
            }
        }

        TypeDef::Result(ok, err) => {
            let map = value
                .as_object()
                .filter(|map| map.len() == 1)
                .ok_or_else(|| {
                    CodecError::new(format!("expected {{\"Ok\": ..}} or {{\"Err\": ..}}, got {}", value))
                })?;
            if let Some(inner) = map.get("Ok") {
                out.push(0);
                encode_value(ok, inner, out)?;
            } else if let Some(inner) = map.get("Err") {
                out.push(1);
                encode_value(err, inner, out)?;
            } else {
                return Err(CodecError::new(format!(
                    "expected {{\"Ok\": ..}} or {{\"Err\": ..}}, got {}",
                    value
                )));
            }
        }

        TypeDef::Tuple(items) if items.is_empty() => {
            if !value.is_null() && value.as_array().map_or(true, |a| !a.is_empty()) {
                return Err(CodecError::new(format!("expected null or [], got {}", value)));
            }
        }

        TypeDef::Tuple(types) => {
            let items = expect_array(value)?;
            if items.len() != types.len() {
                return Err(CodecError::new(format!(
                    "expected a tuple of {} elements, got {}",
                    types.len(),
                    items.len()
                )));
            }
            for (index, (ty, item)) in types.iter().zip(items).enumerate() {
                encode_value(ty, item, out)
                    .map_err(|e| CodecError::new(format!("element {}: {}", index, e)))?;
            }
        }
    }

    Ok(())
}

fn encode_items(ty: &TypeDef, items: &[Value], out: &mut Vec<u8>) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        encode_value(ty, item, out)
            .map_err(|e| CodecError::new(format!("element {}: {}", index, e)))?;
    }
    Ok(())
}

fn expect_array(value: &Value) -> Result<&[Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CodecError::new(format!("expected an array, got {}", value)))
}

fn narrow<T, N>(n: N, ty: &TypeDef) -> Result<T>
where
    T: TryFrom<N>,
    N: Copy + std::fmt::Display,
{
    T::try_from(n).map_err(|_| CodecError::new(format!("{} is out of range for {}", n, ty)))
}

fn parse_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CodecError::new(format!("expected true/false, got '{}'", s))),
        },
        other => Err(CodecError::new(format!("expected a bool, got {}", other))),
    }
}

fn parse_unsigned(value: &Value) -> Result<u128> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| {
                CodecError::new(format!(
                    "{} is not an unsigned integer (pass large values as strings)",
                    n
                ))
            }),
        Value::String(s) => {
            let s = s.trim();
            if let Some(hex_str) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u128::from_str_radix(hex_str, 16)
                    .map_err(|e| CodecError::new(format!("invalid hex integer '{}': {}", s, e)))
            } else {
                s.parse::<u128>()
                    .map_err(|e| CodecError::new(format!("invalid unsigned integer '{}': {}", s, e)))
            }
        }
        other => Err(CodecError::new(format!("expected an integer, got {}", other))),
    }
}

fn parse_signed(value: &Value) -> Result<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .ok_or_else(|| {
                CodecError::new(format!(
                    "{} is not an integer (pass large values as strings)",
                    n
                ))
            }),
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|e| CodecError::new(format!("invalid integer '{}': {}", s, e))),
        other => Err(CodecError::new(format!("expected an integer, got {}", other))),
    }
}

/// Bytes from a `0x` hex string or an array of byte values
fn parse_bytes(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            let hex_str = s
                .strip_prefix("0x")
                .or_else(|| s.strip_prefix("0X"))
                .ok_or_else(|| CodecError::new(format!("expected 0x-prefixed hex, got '{}'", s)))?;
            hex::decode(hex_str).map_err(|e| CodecError::new(format!("invalid hex: {}", e)))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| CodecError::new(format!("{} is not a byte", item)))
            })
            .collect(),
        other => Err(CodecError::new(format!("expected hex bytes, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(ty: &str, value: Value) -> Result<Vec<u8>> {
        let ty: TypeDef = ty.parse().unwrap();
        let mut out = Vec::new();
        encode_value(&ty, &value, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_integers_little_endian() {
        assert_eq!(encode("u32", json!(1)).unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(encode("u16", json!("0x0102")).unwrap(), vec![2, 1]);
        assert_eq!(encode("i8", json!(-1)).unwrap(), vec![0xff]);
        assert_eq!(encode("i32", json!("-2")).unwrap(), (-2i32).to_le_bytes().to_vec());
        assert_eq!(
            encode("Balance", json!("340282366920938463463374607431768211455")).unwrap(),
            vec![0xff; 16]
        );
    }

    #[test]
    fn test_integer_range_checks() {
        assert!(encode("u8", json!(256)).is_err());
        assert!(encode("u32", json!(-1)).is_err());
        assert!(encode("i8", json!(128)).is_err());
        assert!(encode("u64", json!(1.5)).is_err());
        assert!(encode("u32", json!("ten")).is_err());
        assert!(encode("u32", json!(true)).is_err());
    }

    #[test]
    fn test_bool() {
        assert_eq!(encode("bool", json!(true)).unwrap(), vec![1]);
        assert_eq!(encode("bool", json!("false")).unwrap(), vec![0]);
        assert!(encode("bool", json!(1)).is_err());
    }

    #[test]
    fn test_compact() {
        assert_eq!(encode("Compact<u32>", json!(1)).unwrap(), vec![0x04]);
        assert_eq!(encode("Compact<u32>", json!(64)).unwrap(), vec![0x01, 0x01]);
        assert!(encode("Compact<u8>", json!(300)).is_err());
    }

    #[test]
    fn test_strings_and_bytes() {
        assert_eq!(encode("String", json!("abc")).unwrap(), vec![12, b'a', b'b', b'c']);
        assert_eq!(encode("Vec<u8>", json!("0xdead")).unwrap(), vec![8, 0xde, 0xad]);
        assert_eq!(encode("Bytes", json!([1, 2])).unwrap(), vec![8, 1, 2]);
        assert_eq!(encode("[u8; 2]", json!("0x0102")).unwrap(), vec![1, 2]);
        assert!(encode("[u8; 2]", json!("0x010203")).is_err());
        assert!(encode("String", json!(5)).is_err());
    }

    #[test]
    fn test_account_id() {
        let account = format!("0x{}", "11".repeat(32));
        assert_eq!(encode("AccountId", json!(account)).unwrap(), vec![0x11; 32]);
        assert!(encode("AccountId", json!("0x1111")).is_err());
    }

    #[test]
    fn test_containers() {
        assert_eq!(encode("Vec<u16>", json!([1, 2])).unwrap(), vec![8, 1, 0, 2, 0]);
        assert_eq!(encode("Option<u8>", json!(null)).unwrap(), vec![0]);
        assert_eq!(encode("Option<u8>", json!(7)).unwrap(), vec![1, 7]);
        assert_eq!(encode("(bool, u8)", json!([true, 3])).unwrap(), vec![1, 3]);
        assert_eq!(encode("()", json!(null)).unwrap(), Vec::<u8>::new());
        assert_eq!(
            encode("Result<u8, String>", json!({ "Err": "x" })).unwrap(),
            vec![1, 4, b'x']
        );
        assert!(encode("(bool, u8)", json!([true])).is_err());
        assert!(encode("Result<u8, u8>", json!({ "Maybe": 1 })).is_err());
    }

    #[test]
    fn test_unit_and_nested_option() {
        assert_eq!(encode("Option<()>", json!(null)).unwrap(), vec![0]);
        assert_eq!(encode("Option<()>", json!([])).unwrap(), vec![1]);
        assert_eq!(encode("Option<Option<u8>>", json!(null)).unwrap(), vec![0]);
        assert_eq!(encode("Option<Option<u8>>", json!([null])).unwrap(), vec![1, 0]);
        assert_eq!(encode("Option<Option<u8>>", json!([7])).unwrap(), vec![1, 1, 7]);
        assert!(encode("Option<Option<u8>>", json!(7)).is_err());
        assert!(encode("Option<Option<u8>>", json!([1, 2])).is_err());
    }

    #[test]
    fn test_nested_error_reports_element() {
        let err = encode("Vec<u8>", json!([1, 300])).unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }
}
