//! Contract ABI wrapper for Substrate smart contracts
//!
//! Validates a JSON contract ABI, builds one [`CallableMethod`] per entry
//! (`deploy` plus every message, keyed by camelCase name) and encodes calls
//! into selector-prefixed SCALE payloads. Payloads decode back into named
//! arguments with the same codec.
//!
//! ```
//! use contract_abi::ContractAbi;
//! use serde_json::json;
//!
//! let abi = ContractAbi::new(&json!({
//!     "deploy": { "name": "new", "selector": "0x5ebd88d6", "args": [] },
//!     "messages": [{ "name": "get_value", "selector": "0x00000001", "args": [] }]
//! }))
//! .unwrap();
//!
//! let payload = abi.message("getValue").unwrap().encode(&[]).unwrap();
//! assert_eq!(payload.to_hex(), "0x00000001");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod modules;

pub use domain::abi::{
    camel_case, create_method, parse_abi, validate_abi, AbiSpec, ArgSpec, CallPayload,
    CallableMethod, ContractAbi, DecodedArg, DecodedCall, MethodSpec, Selector, TypeCodec,
    TypeDef, ValidationOptions,
};
pub use error::{CodecError, Error, Result, ValidationError, ValidationReason};
pub use infrastructure::ScaleCodec;
