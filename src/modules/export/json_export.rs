//! JSON Export
//!
//! Writes decoded calls to JSON files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::abi::DecodedCall;

/// Write a decoded call to a JSON file
pub fn write_decoded(path: &Path, call: &DecodedCall) -> Result<usize> {
    let json = serde_json::to_string_pretty(call)?;

    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;

    Ok(call.arguments.len())
}
