//! Structural validation of raw ABI descriptions
//!
//! Runs over untyped JSON so that malformed input fails at construction
//! time, with the failing entry and field named in the error.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::naming::camel_case;
use super::{AbiSpec, ArgSpec, MethodSpec, Selector, TypeDef};
use crate::error::{ValidationError, ValidationReason};

/// Keys allowed on the `deploy` entry
pub const DEPLOY_KEYS: &[&str] = &["name", "selector", "args"];
/// Keys allowed on each `messages` entry
pub const MESSAGE_KEYS: &[&str] = &["name", "selector", "args", "mutates", "return_type"];
/// Keys allowed on each argument
pub const ARG_KEYS: &[&str] = &["name", "type"];

/// Knobs for ABI validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Ignore keys the validator does not know instead of rejecting them
    pub allow_unknown_keys: bool,
}

/// Check a raw ABI description without building anything from it
pub fn validate_abi(raw: &Value) -> Result<(), ValidationError> {
    parse_abi(raw, ValidationOptions::default()).map(|_| ())
}

/// Validate a raw ABI description and return its typed form
pub fn parse_abi(raw: &Value, options: ValidationOptions) -> Result<AbiSpec, ValidationError> {
    let abi = raw
        .as_object()
        .filter(|map| !map.is_empty())
        .ok_or_else(|| {
            ValidationError::new("abi", "abi", ValidationReason::Expected("a non-empty object"))
        })?;

    let name = match abi.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => {
            return Err(ValidationError::new(
                "abi",
                "name",
                ValidationReason::Expected("a string"),
            ))
        }
    };

    let deploy = abi
        .get("deploy")
        .ok_or_else(|| ValidationError::new("abi", "deploy", ValidationReason::Missing))?;
    let deploy = deploy.as_object().ok_or_else(|| {
        ValidationError::new("abi", "deploy", ValidationReason::Expected("an object"))
    })?;
    let deploy = parse_method("deploy", deploy, DEPLOY_KEYS, options)?;

    let raw_messages = abi
        .get("messages")
        .ok_or_else(|| ValidationError::new("abi", "messages", ValidationReason::Missing))?
        .as_array()
        .ok_or_else(|| {
            ValidationError::new("abi", "messages", ValidationReason::Expected("an array"))
        })?;

    let mut messages = Vec::with_capacity(raw_messages.len());
    let mut names: HashMap<String, String> = HashMap::new();
    let mut selectors: HashMap<Selector, String> = HashMap::new();

    for (index, raw_message) in raw_messages.iter().enumerate() {
        let message = raw_message.as_object().ok_or_else(|| {
            ValidationError::new(
                "abi",
                format!("messages[{}]", index),
                ValidationReason::Expected("an object"),
            )
        })?;

        let entry = match message.get("name").and_then(Value::as_str) {
            Some(name) => format!("messages.{}", name),
            None => format!("messages[{}]", index),
        };
        let method = parse_method(&entry, message, MESSAGE_KEYS, options)?;

        let key = camel_case(&method.name);
        if let Some(first) = names.get(&key) {
            return Err(ValidationError::new(
                entry,
                "name",
                ValidationReason::DuplicateName {
                    key,
                    first: first.clone(),
                },
            ));
        }
        if let Some(first) = selectors.get(&method.selector) {
            return Err(ValidationError::new(
                entry,
                "selector",
                ValidationReason::DuplicateSelector {
                    selector: method.selector.to_hex(),
                    first: first.clone(),
                },
            ));
        }

        names.insert(key, entry.clone());
        selectors.insert(method.selector, entry);
        messages.push(method);
    }

    Ok(AbiSpec {
        name,
        deploy,
        messages,
    })
}

fn check_keys(
    entry: &str,
    map: &Map<String, Value>,
    allowed: &[&str],
    options: ValidationOptions,
) -> Result<(), ValidationError> {
    if options.allow_unknown_keys {
        return Ok(());
    }
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ValidationError::new(
            entry,
            key.clone(),
            ValidationReason::UnknownKey,
        )),
        None => Ok(()),
    }
}

fn parse_method(
    entry: &str,
    method: &Map<String, Value>,
    allowed: &[&str],
    options: ValidationOptions,
) -> Result<MethodSpec, ValidationError> {
    check_keys(entry, method, allowed, options)?;

    let name = match method.get("name") {
        None => return Err(ValidationError::new(entry, "name", ValidationReason::Missing)),
        Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
        Some(_) => {
            return Err(ValidationError::new(
                entry,
                "name",
                ValidationReason::Expected("a non-empty string"),
            ))
        }
    };

    let selector = method
        .get("selector")
        .ok_or_else(|| ValidationError::new(entry, "selector", ValidationReason::Missing))?;
    let selector = Selector::from_json(selector).map_err(|reason| {
        ValidationError::new(entry, "selector", ValidationReason::InvalidSelector(reason))
    })?;

    let raw_args = method
        .get("args")
        .ok_or_else(|| ValidationError::new(entry, "args", ValidationReason::Missing))?
        .as_array()
        .ok_or_else(|| {
            ValidationError::new(entry, "args", ValidationReason::Expected("an array"))
        })?;

    let args = raw_args
        .iter()
        .enumerate()
        .map(|(index, arg)| parse_arg(entry, index, arg, options))
        .collect::<Result<Vec<_>, _>>()?;

    let mutates = if allowed.contains(&"mutates") {
        match method.get("mutates") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(mutates)) => *mutates,
            Some(_) => {
                return Err(ValidationError::new(
                    entry,
                    "mutates",
                    ValidationReason::Expected("a bool"),
                ))
            }
        }
    } else {
        false
    };

    let return_type = if allowed.contains(&"return_type") {
        match method.get("return_type") {
            None | Some(Value::Null) => None,
            Some(tag) => Some(TypeDef::from_json(tag).map_err(|e| {
                ValidationError::new(
                    entry,
                    "return_type",
                    ValidationReason::UnknownType(e.to_string()),
                )
            })?),
        }
    } else {
        None
    };

    Ok(MethodSpec {
        name,
        selector,
        args,
        mutates,
        return_type,
    })
}

fn parse_arg(
    entry: &str,
    index: usize,
    arg: &Value,
    options: ValidationOptions,
) -> Result<ArgSpec, ValidationError> {
    let arg = arg.as_object().ok_or_else(|| {
        ValidationError::new(
            entry,
            format!("args[{}]", index),
            ValidationReason::Expected("an object"),
        )
    })?;
    let entry = format!("{}.args[{}]", entry, index);
    check_keys(&entry, arg, ARG_KEYS, options)?;

    let name = match arg.get("name") {
        None => return Err(ValidationError::new(entry, "name", ValidationReason::Missing)),
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(ValidationError::new(
                entry,
                "name",
                ValidationReason::Expected("a string"),
            ))
        }
    };

    let tag = arg
        .get("type")
        .ok_or_else(|| ValidationError::new(&entry, "type", ValidationReason::Missing))?;
    let ty = TypeDef::from_json(tag).map_err(|e| {
        ValidationError::new(&entry, "type", ValidationReason::UnknownType(e.to_string()))
    })?;

    Ok(ArgSpec { name, ty })
}
