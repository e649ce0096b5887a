//! ABI domain models and contracts
//!
//! This module defines the ABI model, validation and method descriptors,
//! independent of the byte-level codec (see [`TypeCodec`]).

mod decoder;
mod method;
mod naming;
mod registry;
mod selector;
mod spec;
mod type_def;
mod validation;

pub use decoder::{format_value, DecodedArg, DecodedCall, TypeCodec};
pub use method::{create_method, CallPayload, CallableMethod};
pub use naming::camel_case;
pub use registry::ContractAbi;
pub use selector::Selector;
pub use spec::{AbiSpec, ArgSpec, MethodSpec};
pub use type_def::{ParseTypeError, TypeDef};
pub use validation::{parse_abi, validate_abi, ValidationOptions};
