use crate::{
    field, format, ChainFormatters, Entity, Field, FieldTable, FormatError, FormatOptions,
};
use alloy_primitives::{address, U256};
use serde_json::{json, Value};

fn object(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_formatter_wins_over_replacer() {
    let replacer = FieldTable::new().with("gas", field::quantity).with("nonce", field::number);
    let formatters = FieldTable::new().with("gas", field::remove);
    let raw = object(json!({ "gas": "0x5208", "nonce": "0x2", "extra": [1, 2] }));

    let out = format(
        &raw,
        FormatOptions::builder().formatters(&formatters).replacer(&replacer).build(),
    )
    .unwrap();

    assert!(!out.contains_key("gas"));
    assert_eq!(out["nonce"], Field::Number(2));
    assert_eq!(out["extra"], Field::Raw(json!([1, 2])));
}

#[test]
fn test_without_replacer_only_formatters_apply() {
    let formatters = FieldTable::new().with("value", field::quantity);
    let raw = object(json!({ "value": "0xde0b6b3a7640000", "gas": "0x5208" }));

    let out = format(&raw, FormatOptions::builder().formatters(&formatters).build()).unwrap();
    assert_eq!(out["value"], Field::Quantity(U256::from(1_000_000_000_000_000_000u64)));
    assert_eq!(out["gas"], Field::Raw(json!("0x5208")));
}

#[test]
fn test_ethereum_transaction() {
    let chain = ChainFormatters::ethereum();
    let tx = json!({
        "blockNumber": "0x10",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": null,
        "gas": "0x5208",
        "maxFeePerGas": "0x3b9aca00",
        "nonce": "0x7",
        "type": "0x2",
        "input": "0x",
        "accessList": [],
    });

    let out = chain.format(Entity::Transaction, &tx).unwrap();
    assert_eq!(out["blockNumber"], Field::Number(16));
    assert_eq!(
        out["from"],
        Field::Address(address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"))
    );
    assert!(out["to"].is_null());
    assert_eq!(out["maxFeePerGas"], Field::Quantity(U256::from(1_000_000_000u64)));
    assert_eq!(out["type"], Field::Tag("eip1559"));
    assert_eq!(out["accessList"], Field::Raw(json!([])));

    // celo types are unknown to the ethereum table
    let celo_tx = json!({ "type": "0x7b" });
    assert_eq!(chain.format(Entity::Transaction, &celo_tx).unwrap()["type"], Field::Raw(json!("0x7b")));
}

#[test]
fn test_receipt_status() {
    let chain = ChainFormatters::ethereum();
    let ok = chain.format(Entity::TransactionReceipt, &json!({ "status": "0x1" })).unwrap();
    let failed = chain.format(Entity::TransactionReceipt, &json!({ "status": "0x0" })).unwrap();
    assert_eq!(ok["status"], Field::Tag("success"));
    assert_eq!(failed["status"], Field::Tag("reverted"));
    assert!(chain.format(Entity::TransactionReceipt, &json!({ "status": "0x2" })).is_err());
}

#[test]
fn test_celo_block_overrides() {
    let block = json!({
        "number": "0x1",
        "gasLimit": "0x1c9c380",
        "difficulty": "0x0",
        "nonce": "0x0000000000000000",
        "uncles": [],
        "randomness": { "committed": "0xab", "revealed": "0xcd" },
        "transactions": [
            { "type": "0x7b", "feeCurrency": "0x765de816845861e75a25fca122bb6898b8b1282a", "gas": "0x1" }
        ],
    });

    let celo = ChainFormatters::celo().format_block(&block).unwrap();
    for removed in ["gasLimit", "difficulty", "nonce", "uncles"] {
        assert!(!celo.contains_key(removed), "{removed} should be dropped");
    }
    let Field::Object(randomness) = &celo["randomness"] else { panic!("expected object") };
    assert_eq!(randomness["committed"], Field::Data(vec![0xab].into()));

    let Field::List(transactions) = &celo["transactions"] else { panic!("expected list") };
    let Field::Object(tx) = &transactions[0] else { panic!("expected formatted transaction") };
    assert_eq!(tx["type"], Field::Tag("cip64"));
    assert_eq!(
        tx["feeCurrency"],
        Field::Address(address!("765de816845861e75a25fca122bb6898b8b1282a"))
    );
    assert_eq!(tx["gas"], Field::Quantity(U256::from(1)));

    let ethereum = ChainFormatters::ethereum().format_block(&block).unwrap();
    assert_eq!(ethereum["gasLimit"], Field::Quantity(U256::from(30_000_000u64)));
    assert_eq!(ethereum["randomness"].to_json(), block["randomness"]);
}

#[test]
fn test_block_with_transaction_hashes() {
    let hash = format!("0x{}", "11".repeat(32));
    let block = json!({ "transactions": [hash.clone()] });
    let out = ChainFormatters::ethereum().format_block(&block).unwrap();
    assert_eq!(out["transactions"].to_json(), json!([hash]));
}

#[test]
fn test_format_errors() {
    let chain = ChainFormatters::ethereum();
    assert!(matches!(
        chain.format(Entity::Block, &json!([1])),
        Err(FormatError::ExpectedObject("block"))
    ));
    assert!(matches!(
        chain.format(Entity::Block, &json!({ "number": 12 })),
        Err(FormatError::InvalidField { .. })
    ));
    assert!(matches!(
        chain.format(Entity::Block, &json!({ "number": "0xzz" })),
        Err(FormatError::Hex(_))
    ));
}
