//! Infrastructure layer - codec and filesystem integrations
//!
//! This layer contains:
//! - SCALE argument encoding/decoding using parity-scale-codec
//! - ABI file loading and directory scanning

pub mod abi;
pub mod scale;

pub use abi::{load_abi_file, AbiScanner};
pub use scale::ScaleCodec;
