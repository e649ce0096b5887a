//! Four-byte message selectors

use std::fmt;

use codec::Encode;
use serde_json::Value;

/// Fixed-width discriminator identifying a contract entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    pub const LEN: usize = 4;

    /// Read a selector from its JSON form
    ///
    /// Accepts a `0x`-prefixed hex string of exactly four bytes, an integer
    /// in `u32` range (taken as its SCALE little-endian encoding), or an
    /// array of four byte values.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Self::from_hex(s),
            Value::Number(n) => {
                let n = n
                    .as_u64()
                    .ok_or_else(|| format!("{} is not an unsigned integer", n))?;
                let n = u32::try_from(n).map_err(|_| format!("{} does not fit in u32", n))?;
                Ok(Self::from_u32(n))
            }
            Value::Array(items) => {
                if items.len() != Self::LEN {
                    return Err(format!("expected {} bytes, got {}", Self::LEN, items.len()));
                }
                let mut bytes = [0u8; 4];
                for (slot, item) in bytes.iter_mut().zip(items) {
                    *slot = item
                        .as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| format!("{} is not a byte", item))?;
                }
                Ok(Self(bytes))
            }
            other => Err(format!("unsupported selector {}", other)),
        }
    }

    /// Parse a hex selector (e.g., "0x00000001")
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let normalized = s
            .trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"))
            .ok_or_else(|| format!("`{}` is missing the 0x prefix", s))?;

        if normalized.len() != Self::LEN * 2 {
            return Err(format!(
                "`{}` should have {} hex digits",
                s,
                Self::LEN * 2
            ));
        }

        let bytes = hex::decode(normalized).map_err(|e| format!("`{}`: {}", s, e))?;
        let bytes: [u8; 4] = bytes
            .try_into()
            .map_err(|_| format!("`{}` is not four bytes", s))?;
        Ok(Self(bytes))
    }

    pub fn from_u32(n: u32) -> Self {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&n.encode());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Get selector as hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hex_selector() {
        let selector = Selector::from_json(&json!("0x00000001")).unwrap();
        assert_eq!(selector.0, [0, 0, 0, 1]);
        assert_eq!(selector.to_hex(), "0x00000001");

        assert_eq!(
            Selector::from_hex("0X5EBD88D6").unwrap().to_hex(),
            "0x5ebd88d6"
        );
    }

    #[test]
    fn test_numeric_selector_is_little_endian() {
        let selector = Selector::from_json(&json!(257544423u32)).unwrap();
        assert_eq!(selector.0, 257544423u32.to_le_bytes());
        assert_eq!(Selector::from_json(&json!(1)).unwrap().0, [1, 0, 0, 0]);
    }

    #[test]
    fn test_byte_array_selector() {
        let selector = Selector::from_json(&json!([0xde, 0xad, 0xbe, 0xef])).unwrap();
        assert_eq!(selector.to_hex(), "0xdeadbeef");
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::from_json(&json!("0x0001")).is_err());
        assert!(Selector::from_json(&json!("00000001")).is_err());
        assert!(Selector::from_json(&json!("0xzzzzzzzz")).is_err());
        assert!(Selector::from_json(&json!(-1)).is_err());
        assert!(Selector::from_json(&json!(4294967296u64)).is_err());
        assert!(Selector::from_json(&json!([1, 2, 3])).is_err());
        assert!(Selector::from_json(&json!([1, 2, 3, 256])).is_err());
        assert!(Selector::from_json(&json!(null)).is_err());
    }
}
