//! CSV Export
//!
//! Writes the deploy entry and every message of an ABI, one row each.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::abi::{CallableMethod, ContractAbi};

const HEADER: [&str; 7] = [
    "kind",
    "name",
    "declared_name",
    "selector",
    "args",
    "mutates",
    "return_type",
];

/// Write the method table to a CSV file
pub fn write_methods(path: &Path, abi: &ContractAbi) -> Result<usize> {
    let wtr =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    write_rows(wtr, abi).with_context(|| format!("write {}", path.display()))
}

fn write_rows<W: std::io::Write>(mut wtr: csv::Writer<W>, abi: &ContractAbi) -> Result<usize> {
    wtr.write_record(HEADER)?;

    wtr.write_record(row("deploy", "deploy", abi.deploy()))?;
    for (name, method) in abi.messages() {
        wtr.write_record(row("message", name, method))?;
    }

    wtr.flush()?;
    Ok(abi.len() + 1)
}

fn row(kind: &str, name: &str, method: &CallableMethod) -> [String; 7] {
    let args: Vec<String> = method
        .args()
        .iter()
        .map(|arg| format!("{}: {}", arg.name, arg.ty))
        .collect();

    [
        kind.to_string(),
        name.to_string(),
        method.declared_name().to_string(),
        method.selector().to_hex(),
        args.join("; "),
        (!method.is_constant()).to_string(),
        method
            .return_type()
            .map(ToString::to_string)
            .unwrap_or_default(),
    ]
}
