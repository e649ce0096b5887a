//! SCALE decoding into JSON values

use codec::{Compact, Decode};
use serde_json::{json, Value};

use crate::domain::abi::TypeDef;
use crate::error::CodecError;

type Result<T> = std::result::Result<T, CodecError>;

/// Decode one value of type `ty`, advancing `input`
pub(super) fn decode_value(ty: &TypeDef, input: &mut &[u8]) -> Result<Value> {
    let value = match ty {
        TypeDef::Bool => Value::Bool(read::<bool>(input)?),

        TypeDef::U8 => Value::from(read::<u8>(input)?),
        TypeDef::U16 => Value::from(read::<u16>(input)?),
        TypeDef::U32 => Value::from(read::<u32>(input)?),
        TypeDef::U64 => Value::from(read::<u64>(input)?),
        TypeDef::U128 => unsigned_value(read::<u128>(input)?),

        TypeDef::I8 => Value::from(read::<i8>(input)?),
        TypeDef::I16 => Value::from(read::<i16>(input)?),
        TypeDef::I32 => Value::from(read::<i32>(input)?),
        TypeDef::I64 => Value::from(read::<i64>(input)?),
        TypeDef::I128 => signed_value(read::<i128>(input)?),

        TypeDef::Compact(inner) => {
            let n = read::<Compact<u128>>(input)?.0;
            let max = match inner.as_ref() {
                TypeDef::U8 => u128::from(u8::MAX),
                TypeDef::U16 => u128::from(u16::MAX),
                TypeDef::U32 => u128::from(u32::MAX),
                TypeDef::U64 => u128::from(u64::MAX),
                _ => u128::MAX,
            };
            if n > max {
                return Err(CodecError::new(format!("{} is out of range for {}", n, inner)));
            }
            unsigned_value(n)
        }

        TypeDef::Str => Value::String(read::<String>(input)?),

        TypeDef::AccountId | TypeDef::Hash => hex_value(take(input, 32)?),

        TypeDef::Vec(inner) => {
            let len = read::<Compact<u32>>(input)?.0 as usize;
            if inner.is_byte() {
                hex_value(take(input, len)?)
            } else {
                Value::Array(decode_items(inner, len, input)?)
            }
        }

        TypeDef::Array(inner, len) => {
            if inner.is_byte() {
                hex_value(take(input, *len)?)
            } else {
                Value::Array(decode_items(inner, *len, input)?)
            }
        }

        TypeDef::Option(inner) => match read::<u8>(input)? {
            0 => Value::Null,
            // `[v]` keeps Some(None) apart from None
            1 if inner.is_nullable() => Value::Array(vec![decode_value(inner, input)?]),
            1 => decode_value(inner, input)?,
            tag => return Err(CodecError::new(format!("invalid Option tag {}", tag))),
        },

        TypeDef::Result(ok, err) => match read::<u8>(input)? {
            0 => json!({ "Ok": decode_value(ok, input)? }),
            1 => json!({ "Err": decode_value(err, input)? }),
            tag => return Err(CodecError::new(format!("invalid Result tag {}", tag))),
        },

        TypeDef::Tuple(types) if types.is_empty() => Value::Array(Vec::new()),

        TypeDef::Tuple(types) => {
            let mut items = Vec::with_capacity(types.len());
            for (index, ty) in types.iter().enumerate() {
                let item = decode_value(ty, input)
                    .map_err(|e| CodecError::new(format!("element {}: {}", index, e)))?;
                items.push(item);
            }
            Value::Array(items)
        }
    };

    Ok(value)
}

fn read<T: Decode>(input: &mut &[u8]) -> Result<T> {
    T::decode(input).map_err(|e| CodecError::new(e.to_string()))
}

fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(CodecError::new(format!(
            "need {} bytes, only {} left",
            len,
            input.len()
        )));
    }
    let slice: &'a [u8] = *input;
    let (head, rest) = slice.split_at(len);
    *input = rest;
    Ok(head)
}

fn decode_items(ty: &TypeDef, len: usize, input: &mut &[u8]) -> Result<Vec<Value>> {
    if len > 0 && ty.is_zero_sized() {
        return Err(CodecError::new(format!("sequence of zero-sized {}", ty)));
    }
    // every element takes at least one byte
    if len > input.len() {
        return Err(CodecError::new(format!(
            "{} elements declared, only {} bytes left",
            len,
            input.len()
        )));
    }
    let mut items = Vec::with_capacity(len);
    for index in 0..len {
        let item = decode_value(ty, input)
            .map_err(|e| CodecError::new(format!("element {}: {}", index, e)))?;
        items.push(item);
    }
    Ok(items)
}

fn hex_value(bytes: &[u8]) -> Value {
    Value::String(format!("0x{}", hex::encode(bytes)))
}

/// JSON number when it fits, decimal string otherwise
fn unsigned_value(n: u128) -> Value {
    match u64::try_from(n) {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(n.to_string()),
    }
}

fn signed_value(n: i128) -> Value {
    match i64::try_from(n) {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(n.to_string()),
    }
}
