//! ABI inspection: validation summary and method table

use super::ToolResult;
use crate::domain::abi::{CallableMethod, ContractAbi};

/// Summary of a successfully validated ABI
pub fn summary(abi: &ContractAbi) -> ToolResult {
    ToolResult::new("ABI OK")
        .add("contract", abi.name().unwrap_or("<unnamed>"))
        .add("deploy", abi.deploy().selector().to_hex())
        .add("messages", abi.len().to_string())
}

/// One line per entry: deploy first, then messages in declaration order
pub fn method_table(abi: &ContractAbi) -> ToolResult {
    let mut result = ToolResult::new(format!(
        "Contract {}",
        abi.name().unwrap_or("<unnamed>")
    ));

    result = result.add("deploy", describe(abi.deploy()));
    for (name, method) in abi.messages() {
        result = result.add(name, describe(method));
    }
    result
}

/// e.g. `0x00000001 inc(by: i32) [mutates]`
pub fn describe(method: &CallableMethod) -> String {
    let mut line = format!("{} {}", method.selector(), method.spec().signature());
    if !method.is_constant() {
        line.push_str(" [mutates]");
    }
    line
}
