//! Command modules
//!
//! Modules:
//! - toolkit: command implementations behind the CLI (validate, encode, decode, ...)
//! - export: CSV and JSON export of method tables and decoded calls

pub mod export;
pub mod toolkit;
