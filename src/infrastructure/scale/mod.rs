//! SCALE infrastructure - parity-scale-codec backed argument encoding

mod decoder;
mod encoder;

use std::sync::Arc;

use serde_json::Value;

use crate::domain::abi::{ContractAbi, TypeCodec, TypeDef, ValidationOptions};
use crate::error::{self, CodecError};

/// Type codec implementation using parity-scale-codec
#[derive(Debug, Default, Clone, Copy)]
pub struct ScaleCodec;

impl ScaleCodec {
    pub fn new() -> Self {
        Self
    }
}

impl TypeCodec for ScaleCodec {
    fn encode_value(
        &self,
        ty: &TypeDef,
        value: &Value,
        out: &mut Vec<u8>,
    ) -> Result<(), CodecError> {
        encoder::encode_value(ty, value, out)
    }

    fn decode_value(&self, ty: &TypeDef, input: &mut &[u8]) -> Result<Value, CodecError> {
        decoder::decode_value(ty, input)
    }
}

/// Constructors bound to the SCALE codec
impl ContractAbi {
    /// Build from a raw ABI description
    pub fn new(raw: &Value) -> error::Result<Self> {
        Self::with_options(raw, ValidationOptions::default())
    }

    pub fn with_options(raw: &Value, options: ValidationOptions) -> error::Result<Self> {
        Self::with_codec(raw, options, Arc::new(ScaleCodec::new()))
    }

    /// Parse ABI JSON text
    pub fn from_json_str(json: &str) -> error::Result<Self> {
        let raw: Value = serde_json::from_str(json)?;
        Self::new(&raw)
    }
}
