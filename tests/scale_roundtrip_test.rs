//! Payloads produced by the wrapper decode with parity-scale-codec's own types

use codec::{Compact, Decode, Encode};
use contract_abi::ContractAbi;
use serde_json::json;

fn abi() -> ContractAbi {
    ContractAbi::new(&json!({
        "deploy": {
            "name": "new",
            "selector": "0x9bae9d5e",
            "args": [
                { "name": "owner", "type": "AccountId" },
                { "name": "supply", "type": "Balance" }
            ]
        },
        "messages": [
            {
                "name": "set_memo",
                "selector": "0x00000010",
                "mutates": true,
                "args": [
                    { "name": "memo", "type": "Option<String>" },
                    { "name": "tags", "type": "Vec<(u8, bool)>" }
                ]
            },
            {
                "name": "record",
                "selector": "0x00000011",
                "mutates": true,
                "args": [
                    { "name": "at", "type": "BlockNumber" },
                    { "name": "delta", "type": "i64" },
                    { "name": "count", "type": "Compact<u32>" },
                    { "name": "outcome", "type": "Result<u8, String>" },
                    { "name": "digest", "type": "[u8; 4]" }
                ]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn test_constructor_args_decode_in_order() {
    let abi = abi();
    let owner = [7u8; 32];
    let payload = abi
        .deploy()
        .encode(&[json!(format!("0x{}", hex::encode(owner))), json!("1000000000000000000000")])
        .unwrap();

    let (selector, mut rest) = payload.as_bytes().split_at(4);
    assert_eq!(selector, &[0x9b, 0xae, 0x9d, 0x5e]);
    assert_eq!(<[u8; 32]>::decode(&mut rest).unwrap(), owner);
    assert_eq!(u128::decode(&mut rest).unwrap(), 1_000_000_000_000_000_000_000);
    assert!(rest.is_empty());
}

#[test]
fn test_containers_match_codec_encoding() {
    let abi = abi();
    let payload = abi
        .message("setMemo")
        .unwrap()
        .encode(&[json!("hello"), json!([[1, true], [2, false]])])
        .unwrap();

    let mut expected = vec![0, 0, 0, 0x10];
    Some("hello".to_string()).encode_to(&mut expected);
    vec![(1u8, true), (2u8, false)].encode_to(&mut expected);
    assert_eq!(payload.as_bytes(), expected.as_slice());

    let mut rest = &payload.as_bytes()[4..];
    assert_eq!(
        <Option<String>>::decode(&mut rest).unwrap(),
        Some("hello".to_string())
    );
    assert_eq!(
        <Vec<(u8, bool)>>::decode(&mut rest).unwrap(),
        vec![(1, true), (2, false)]
    );
}

#[test]
fn test_mixed_arguments_roundtrip() {
    let abi = abi();
    let record = abi.message("record").unwrap();
    let args = [
        json!(42),
        json!(-7),
        json!(300),
        json!({ "Err": "boom" }),
        json!("0x01020304"),
    ];
    let payload = record.encode(&args).unwrap();

    let mut rest = &payload.as_bytes()[4..];
    assert_eq!(u64::decode(&mut rest).unwrap(), 42);
    assert_eq!(i64::decode(&mut rest).unwrap(), -7);
    assert_eq!(<Compact<u32>>::decode(&mut rest).unwrap().0, 300);
    assert_eq!(
        <Result<u8, String>>::decode(&mut rest).unwrap(),
        Err("boom".to_string())
    );
    assert_eq!(<[u8; 4]>::decode(&mut rest).unwrap(), [1, 2, 3, 4]);
    assert!(rest.is_empty());

    let decoded = record.decode(payload.as_bytes()).unwrap();
    let values: Vec<_> = decoded.arguments.iter().map(|arg| arg.value.clone()).collect();
    assert_eq!(values, args.to_vec());
}

#[test]
fn test_length_prefixed_payload() {
    let abi = abi();
    let payload = abi
        .message("setMemo")
        .unwrap()
        .encode(&[json!(null), json!([])])
        .unwrap();
    let framed = payload.length_prefixed();

    let mut input = framed.as_slice();
    assert_eq!(Vec::<u8>::decode(&mut input).unwrap(), payload.as_bytes());
    assert_eq!(
        contract_abi::CallPayload::from_length_prefixed(&framed).unwrap(),
        payload
    );
}

fn optional_abi() -> ContractAbi {
    ContractAbi::new(&json!({
        "deploy": { "name": "new", "selector": "0x00000000", "args": [] },
        "messages": [
            {
                "name": "set_flags",
                "selector": "0x00000002",
                "mutates": true,
                "args": [
                    { "name": "touched", "type": "Option<()>" },
                    { "name": "limit", "type": "Option<Option<u32>>" }
                ]
            },
            {
                "name": "set_values",
                "selector": "0x00000003",
                "mutates": true,
                "args": [{ "name": "values", "type": "Vec<u16>" }]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn test_nullable_options_roundtrip() {
    let abi = optional_abi();
    let set_flags = abi.message("setFlags").unwrap();

    for args in [
        [json!([]), json!([null])],
        [json!(null), json!(null)],
        [json!([]), json!([9])],
    ] {
        let payload = set_flags.encode(&args).unwrap();
        let decoded = set_flags.decode(payload.as_bytes()).unwrap();
        let values: Vec<_> = decoded.arguments.iter().map(|arg| arg.value.clone()).collect();
        assert_eq!(values, args.to_vec());
        assert_eq!(set_flags.encode(&values).unwrap(), payload);
    }

    let payload = set_flags.encode(&[json!([]), json!([null])]).unwrap();
    let mut rest = &payload.as_bytes()[4..];
    assert_eq!(<Option<()>>::decode(&mut rest).unwrap(), Some(()));
    assert_eq!(<Option<Option<u32>>>::decode(&mut rest).unwrap(), Some(None));
}

#[test]
fn test_oversized_sequence_length_is_rejected() {
    let abi = optional_abi();

    let mut payload = vec![0, 0, 0, 3];
    Compact(0x3fff_ffffu32).encode_to(&mut payload);
    payload.extend_from_slice(&[1, 0]);

    assert!(matches!(
        abi.decode_call(&payload),
        Err(contract_abi::Error::Decode { .. })
    ));
}

#[test]
fn test_zero_sized_sequence_type_is_rejected() {
    for ty in ["Vec<()>", "[(); 4096]", "Vec<[u8; 0]>"] {
        let result = ContractAbi::new(&json!({
            "deploy": { "name": "new", "selector": "0x00000000", "args": [] },
            "messages": [{
                "name": "store",
                "selector": "0x00000001",
                "args": [{ "name": "xs", "type": ty }]
            }]
        }));
        assert!(
            matches!(result, Err(contract_abi::Error::Validation(_))),
            "{} should fail validation",
            ty
        );
    }
}
