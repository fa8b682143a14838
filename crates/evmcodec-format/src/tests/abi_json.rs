use crate::{value_from_json, value_to_json, FormatError};
use alloy_primitives::{address, I256, U256};
use evmcodec::{AbiValue, Param, ParamType};
use serde_json::json;

fn kind(ty: &str) -> ParamType {
    ParamType::parse(ty).unwrap()
}

#[test]
fn test_integers_from_numbers_and_strings() {
    let uint = kind("uint256");
    assert_eq!(value_from_json(&uint, &json!(420)).unwrap(), AbiValue::Uint(U256::from(420)));
    assert_eq!(value_from_json(&uint, &json!("420")).unwrap(), AbiValue::Uint(U256::from(420)));
    assert_eq!(value_from_json(&uint, &json!("0x1a4")).unwrap(), AbiValue::Uint(U256::from(420)));
    assert!(value_from_json(&uint, &json!(-1)).is_err());

    let int = kind("int256");
    let minus_five = AbiValue::Int(I256::try_from(-5i64).unwrap());
    assert_eq!(value_from_json(&int, &json!(-5)).unwrap(), minus_five);
    assert_eq!(value_from_json(&int, &json!("-5")).unwrap(), minus_five);
}

#[test]
fn test_tuple_positional_and_named() {
    let params = Param::parse_list("(address owner, uint64[2] ids, bytes2 tag)").unwrap();
    let owner = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
    let expected = AbiValue::Tuple(vec![
        owner.into(),
        AbiValue::Array(vec![1u64.into(), 2u64.into()]),
        AbiValue::FixedBytes(vec![0xbe, 0xef].into()),
    ]);

    let positional = json!([owner.to_string(), [1, 2], "0xbeef"]);
    let named = json!({ "tag": "0xbeef", "ids": ["1", "0x2"], "owner": owner.to_string() });
    assert_eq!(value_from_json(&params[0].kind, &positional).unwrap(), expected);
    assert_eq!(value_from_json(&params[0].kind, &named).unwrap(), expected);
}

#[test]
fn test_json_mismatches() {
    assert!(matches!(
        value_from_json(&kind("uint8[2]"), &json!([1])),
        Err(FormatError::InvalidAbiJson { .. })
    ));
    assert!(matches!(
        value_from_json(&kind("bytes4"), &json!("0x01")),
        Err(FormatError::InvalidAbiJson { .. })
    ));
    assert!(matches!(value_from_json(&kind("address"), &json!("0x12")), Err(FormatError::Hex(_))));
    assert!(value_from_json(&kind("bool"), &json!(1)).is_err());
}

#[test]
fn test_value_to_json() {
    let value = AbiValue::NamedTuple(vec![
        ("amount".to_string(), AbiValue::Uint(U256::MAX)),
        ("ok".to_string(), AbiValue::Bool(true)),
        ("memo".to_string(), AbiValue::Bytes(vec![1, 2].into())),
    ]);
    assert_eq!(
        value_to_json(&value),
        json!({ "amount": U256::MAX.to_string(), "ok": true, "memo": "0x0102" })
    );
    assert_eq!(
        value_to_json(&AbiValue::Address(address!("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"))),
        json!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
    );
}
