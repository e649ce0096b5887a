//! Callable method descriptors

use std::fmt;
use std::sync::Arc;

use codec::Decode;
use serde_json::Value;
use tracing::trace;

use super::naming::camel_case;
use super::{ArgSpec, DecodedArg, DecodedCall, MethodSpec, Selector, TypeCodec, TypeDef};
use crate::error::{CodecError, Error, Result};

/// Encoded call payload: selector followed by the encoded arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPayload(Vec<u8>);

impl CallPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Leading selector bytes
    pub fn selector(&self) -> Selector {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.0[..Selector::LEN]);
        Selector::from(bytes)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Payload framed with its SCALE compact length, as submitted on chain
    pub fn length_prefixed(&self) -> Vec<u8> {
        codec::Encode::encode(&self.0)
    }

    /// Strip the compact length prefix added by [`length_prefixed`](Self::length_prefixed)
    pub fn from_length_prefixed(data: &[u8]) -> std::result::Result<Self, CodecError> {
        let mut input = data;
        let bytes = Vec::<u8>::decode(&mut input)
            .map_err(|e| CodecError::new(format!("invalid length prefix: {}", e)))?;
        if !input.is_empty() {
            return Err(CodecError::new(format!(
                "{} bytes after length-prefixed payload",
                input.len()
            )));
        }
        if bytes.len() < Selector::LEN {
            return Err(CodecError::new("payload shorter than a selector"));
        }
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for CallPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CallPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An invocable descriptor bound to one ABI entry
///
/// Immutable once built; the codec handle is shared read-only.
#[derive(Debug, Clone)]
pub struct CallableMethod {
    qualified_name: String,
    spec: MethodSpec,
    /// Arguments with camelCased names
    args: Vec<ArgSpec>,
    codec: Arc<dyn TypeCodec>,
}

/// Build a callable method for one validated entry
///
/// `qualified_name` (e.g. `deploy`, `messages.getValue`) is only used in
/// error messages and decoded output.
pub fn create_method(
    qualified_name: impl Into<String>,
    spec: &MethodSpec,
    codec: Arc<dyn TypeCodec>,
) -> CallableMethod {
    let qualified_name = qualified_name.into();
    let args = spec
        .args
        .iter()
        .map(|arg| ArgSpec {
            name: camel_case(&arg.name),
            ty: arg.ty.clone(),
        })
        .collect();

    trace!(method = %qualified_name, selector = %spec.selector, "created method");

    CallableMethod {
        qualified_name,
        spec: spec.clone(),
        args,
        codec,
    }
}

impl CallableMethod {
    /// Qualified name (e.g., "messages.getValue")
    pub fn name(&self) -> &str {
        &self.qualified_name
    }

    /// Name as declared in the ABI
    pub fn declared_name(&self) -> &str {
        &self.spec.name
    }

    pub fn selector(&self) -> Selector {
        self.spec.selector
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// True for read-only messages
    pub fn is_constant(&self) -> bool {
        !self.spec.mutates
    }

    pub fn return_type(&self) -> Option<&TypeDef> {
        self.spec.return_type.as_ref()
    }

    pub fn spec(&self) -> &MethodSpec {
        &self.spec
    }

    /// Encode a call with positional arguments
    pub fn encode(&self, params: &[Value]) -> Result<CallPayload> {
        if params.len() != self.args.len() {
            return Err(Error::Arity {
                method: self.qualified_name.clone(),
                expected: self.args.len(),
                found: params.len(),
            });
        }

        let mut out = self.spec.selector.as_bytes().to_vec();
        for (arg, value) in self.args.iter().zip(params) {
            self.codec
                .encode_value(&arg.ty, value, &mut out)
                .map_err(|e| Error::Type {
                    method: self.qualified_name.clone(),
                    arg: arg.name.clone(),
                    ty: arg.ty.to_string(),
                    reason: e.0,
                })?;
        }

        Ok(CallPayload(out))
    }

    /// Decode a payload produced by [`encode`](Self::encode)
    pub fn decode(&self, payload: &[u8]) -> Result<DecodedCall> {
        if payload.len() < Selector::LEN {
            return Err(self.decode_error("payload too short (need at least 4 bytes for selector)"));
        }

        let (selector, mut input) = payload.split_at(Selector::LEN);
        if selector != self.spec.selector.as_bytes() {
            return Err(self.decode_error(format!(
                "selector mismatch: got 0x{}, expected {}",
                hex::encode(selector),
                self.spec.selector
            )));
        }

        let mut arguments = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            let value = self
                .codec
                .decode_value(&arg.ty, &mut input)
                .map_err(|e| self.decode_error(format!("argument `{}`: {}", arg.name, e)))?;
            arguments.push(DecodedArg {
                name: arg.name.clone(),
                kind: arg.ty.to_string(),
                value,
            });
        }

        if !input.is_empty() {
            return Err(self.decode_error(format!("{} trailing bytes", input.len())));
        }

        Ok(DecodedCall {
            method: self.qualified_name.clone(),
            selector: self.spec.selector.to_hex(),
            arguments,
        })
    }

    /// Decode a value returned by this message
    ///
    /// Messages without a return type expect empty output and yield `null`.
    pub fn decode_return(&self, data: &[u8]) -> Result<Value> {
        let Some(ty) = &self.spec.return_type else {
            if data.is_empty() {
                return Ok(Value::Null);
            }
            return Err(self.decode_error("no return type declared but output is not empty"));
        };

        let mut input = data;
        let value = self
            .codec
            .decode_value(ty, &mut input)
            .map_err(|e| self.decode_error(format!("return value: {}", e)))?;
        if !input.is_empty() {
            return Err(self.decode_error(format!("{} trailing bytes", input.len())));
        }
        Ok(value)
    }

    fn decode_error(&self, reason: impl Into<String>) -> Error {
        Error::Decode {
            method: self.qualified_name.clone(),
            reason: reason.into(),
        }
    }
}
