//! Export Module
//!
//! Writes ABI method tables to CSV and decoded calls to JSON.

pub mod csv_export;
pub mod json_export;

pub use csv_export::write_methods;
pub use json_export::write_decoded;
