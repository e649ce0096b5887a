//! Contract ABI wrapper - callable methods indexed by camelCase name

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::naming::camel_case;
use super::validation::{parse_abi, ValidationOptions};
use super::{create_method, AbiSpec, CallableMethod, DecodedCall, Selector, TypeCodec};
use crate::error::{Error, Result};

/// A validated contract ABI with one callable method per entry
///
/// Built once from a raw description and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ContractAbi {
    spec: AbiSpec,
    deploy: CallableMethod,
    /// Messages by camelCase name, in declaration order
    messages: IndexMap<String, CallableMethod>,
}

impl ContractAbi {
    /// Build with a specific type codec
    ///
    /// `ContractAbi::new` and `ContractAbi::with_options` use `ScaleCodec`.
    pub fn with_codec(
        raw: &Value,
        options: ValidationOptions,
        codec: Arc<dyn TypeCodec>,
    ) -> Result<Self> {
        let spec = parse_abi(raw, options)?;

        let deploy = create_method("deploy", &spec.deploy, Arc::clone(&codec));

        let mut messages = IndexMap::with_capacity(spec.messages.len());
        for method in &spec.messages {
            let name = camel_case(&method.name);
            let callable = create_method(format!("messages.{}", name), method, Arc::clone(&codec));
            messages.insert(name, callable);
        }

        debug!(
            contract = spec.name.as_deref().unwrap_or("<unnamed>"),
            messages = messages.len(),
            "built contract ABI"
        );

        Ok(Self {
            spec,
            deploy,
            messages,
        })
    }

    /// The validated ABI this wrapper was built from
    pub fn spec(&self) -> &AbiSpec {
        &self.spec
    }

    /// Contract name, if declared
    pub fn name(&self) -> Option<&str> {
        self.spec.name.as_deref()
    }

    pub fn deploy(&self) -> &CallableMethod {
        &self.deploy
    }

    /// Look up a message by its camelCase name
    pub fn message(&self, name: &str) -> Result<&CallableMethod> {
        self.messages.get(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })
    }

    /// Look up a message by selector
    pub fn message_by_selector(&self, selector: Selector) -> Result<&CallableMethod> {
        self.messages
            .values()
            .find(|method| method.selector() == selector)
            .ok_or_else(|| Error::NotFound {
                name: format!("with selector {}", selector),
            })
    }

    /// Messages in declaration order
    pub fn messages(&self) -> impl Iterator<Item = (&str, &CallableMethod)> {
        self.messages.iter().map(|(name, method)| (name.as_str(), method))
    }

    /// camelCase message names in declaration order
    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Decode a message call payload, dispatching on its selector
    pub fn decode_call(&self, payload: &[u8]) -> Result<DecodedCall> {
        if payload.len() < Selector::LEN {
            return Err(Error::Decode {
                method: "messages".to_string(),
                reason: "payload too short (need at least 4 bytes for selector)".to_string(),
            });
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&payload[..Selector::LEN]);
        self.message_by_selector(Selector::from(selector))?.decode(payload)
    }

    /// Decode a constructor payload
    pub fn decode_deploy(&self, payload: &[u8]) -> Result<DecodedCall> {
        self.deploy.decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flipper() -> Value {
        json!({
            "name": "Flipper",
            "deploy": { "name": "new", "selector": "0x9bae9d5e", "args": [{ "name": "init_value", "type": "bool" }] },
            "messages": [
                { "name": "flip", "selector": "0x633aa551", "mutates": true, "args": [] },
                { "name": "get_value", "selector": "0x00000001", "args": [], "return_type": "bool" }
            ]
        })
    }

    #[derive(Debug)]
    struct MarkerCodec;

    impl TypeCodec for MarkerCodec {
        fn encode_value(
            &self,
            _ty: &crate::domain::abi::TypeDef,
            _value: &Value,
            out: &mut Vec<u8>,
        ) -> std::result::Result<(), crate::error::CodecError> {
            out.push(0xff);
            Ok(())
        }

        fn decode_value(
            &self,
            _ty: &crate::domain::abi::TypeDef,
            input: &mut &[u8],
        ) -> std::result::Result<Value, crate::error::CodecError> {
            let (_, rest) = input
                .split_first()
                .ok_or_else(|| crate::error::CodecError::new("empty"))?;
            *input = rest;
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_with_custom_codec() {
        let abi = ContractAbi::with_codec(
            &flipper(),
            ValidationOptions::default(),
            Arc::new(MarkerCodec),
        )
        .unwrap();

        let payload = abi.deploy().encode(&[json!(true)]).unwrap();
        assert_eq!(payload.as_bytes(), &[0x9b, 0xae, 0x9d, 0x5e, 0xff]);
        let decoded = abi.decode_deploy(payload.as_bytes()).unwrap();
        assert_eq!(decoded.arguments[0].value, Value::Null);
    }

    #[test]
    fn test_registry_lookup() {
        let abi = ContractAbi::new(&flipper()).unwrap();

        assert_eq!(abi.name(), Some("Flipper"));
        assert_eq!(abi.len(), 2);
        assert_eq!(abi.message_names().collect::<Vec<_>>(), vec!["flip", "getValue"]);
        assert_eq!(abi.message("getValue").unwrap().name(), "messages.getValue");
        assert_eq!(abi.deploy().name(), "deploy");
    }

    #[test]
    fn test_lookup_is_by_camel_case_key() {
        let abi = ContractAbi::new(&flipper()).unwrap();

        let err = abi.message("get_value").unwrap_err();
        assert!(matches!(err, Error::NotFound { name } if name == "get_value"));
        assert!(abi.message("transfer").is_err());
    }

    #[test]
    fn test_get_value_example() {
        let abi = ContractAbi::new(&flipper()).unwrap();
        let get_value = abi.message("getValue").unwrap();

        assert_eq!(get_value.arity(), 0);
        assert!(get_value.is_constant());
        assert_eq!(get_value.encode(&[]).unwrap().to_hex(), "0x00000001");
    }

    #[test]
    fn test_decode_call_dispatches_on_selector() {
        let abi = ContractAbi::new(&flipper()).unwrap();

        let decoded = abi.decode_call(&[0x63, 0x3a, 0xa5, 0x51]).unwrap();
        assert_eq!(decoded.method, "messages.flip");
        assert!(decoded.arguments.is_empty());

        assert!(matches!(
            abi.decode_call(&[0xde, 0xad, 0xbe, 0xef]),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(abi.decode_call(&[0x63]), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_decode_deploy() {
        let abi = ContractAbi::new(&flipper()).unwrap();
        let payload = abi.deploy().encode(&[json!(true)]).unwrap();

        let decoded = abi.decode_deploy(payload.as_bytes()).unwrap();
        assert_eq!(decoded.arguments[0].name, "initValue");
        assert_eq!(decoded.arguments[0].value, json!(true));
    }

    #[test]
    fn test_construction_is_all_or_nothing() {
        let mut raw = flipper();
        raw["messages"][1]["args"] = json!([{ "name": "x" }]);
        assert!(matches!(ContractAbi::new(&raw), Err(Error::Validation(_))));

        assert!(matches!(
            ContractAbi::from_json_str("{ not json"),
            Err(Error::Json(_))
        ));
    }
}
