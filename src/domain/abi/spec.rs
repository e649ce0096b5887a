//! Validated ABI model

use super::{Selector, TypeDef};

/// A method argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    /// Argument name as declared
    pub name: String,
    pub ty: TypeDef,
}

/// A constructor or message entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    /// Declared name, source casing (e.g. snake_case)
    pub name: String,
    pub selector: Selector,
    pub args: Vec<ArgSpec>,
    /// Whether the call may change contract state
    pub mutates: bool,
    pub return_type: Option<TypeDef>,
}

/// A contract ABI that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiSpec {
    /// Contract name, if the ABI declares one
    pub name: Option<String>,
    pub deploy: MethodSpec,
    /// Messages in declaration order
    pub messages: Vec<MethodSpec>,
}

impl MethodSpec {
    /// Rust-style signature for display (e.g., "inc(by: i32)")
    pub fn signature(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| format!("{}: {}", arg.name, arg.ty))
            .collect();
        match &self.return_type {
            Some(ret) => format!("{}({}) -> {}", self.name, args.join(", "), ret),
            None => format!("{}({})", self.name, args.join(", ")),
        }
    }
}
