use crate::{
    rlp::{to_rlp, RlpItem},
    transaction::{
        fee_from_hex, parse_transaction, serialize_transaction, serialized_transaction_type,
        AccessListItem, Signature, TransactionError, TransactionSerializable, TxCip42, TxCip64,
        TxEip1559, TxEip2930, TxLegacy, TxType,
    },
};
use alloy_primitives::{address, bytes, hex, B256, U256};

fn eip1559() -> TxEip1559 {
    TxEip1559 {
        chain_id: 1,
        max_priority_fee_per_gas: U256::from(1),
        max_fee_per_gas: U256::from(2),
        gas: U256::from(21_000),
        to: Some(address!("7070707070707070707070707070707070707070")),
        ..Default::default()
    }
}

fn signature() -> Signature {
    Signature::new(U256::from(0xabcdef_u64), U256::from(0x123456_u64), true)
}

fn roundtrip(tx: TransactionSerializable) {
    let serialized = serialize_transaction(&tx, None).unwrap();
    assert_eq!(serialized_transaction_type(&serialized).unwrap(), tx.tx_type());
    assert_eq!(parse_transaction(&serialized).unwrap(), tx);
}

#[test]
fn test_eip1559_unsigned_vector() {
    let serialized = serialize_transaction(&eip1559().into(), None).unwrap();
    assert_eq!(
        hex::encode_prefixed(&serialized),
        "0x02df018001028252089470707070707070707070707070707070707070708080c0"
    );
}

#[test]
fn test_eip2930_access_list_vector() {
    let tx = TxEip2930 {
        chain_id: 1,
        gas_price: U256::from(1),
        gas: U256::from(21_000),
        data: bytes!("1234"),
        access_list: vec![AccessListItem {
            address: address!("1111111111111111111111111111111111111111"),
            storage_keys: vec![B256::ZERO],
        }],
        ..Default::default()
    };
    let expected = format!(
        "0x01f8450180018252088080821234f838f794{}e1a0{}",
        "11".repeat(20),
        "00".repeat(32)
    );

    let serialized = serialize_transaction(&tx.clone().into(), None).unwrap();
    assert_eq!(hex::encode_prefixed(&serialized), expected);
    assert_eq!(parse_transaction(&serialized).unwrap(), TransactionSerializable::Eip2930(tx));
}

#[test]
fn test_legacy_eip155_signing_payload() {
    let tx = TxLegacy {
        chain_id: Some(1),
        nonce: 9,
        gas_price: U256::from(20_000_000_000u64),
        gas: U256::from(21_000),
        to: Some(address!("3535353535353535353535353535353535353535")),
        value: U256::from(1_000_000_000_000_000_000u64),
        ..Default::default()
    };
    let serialized = serialize_transaction(&tx.clone().into(), None).unwrap();
    assert_eq!(
        hex::encode_prefixed(&serialized),
        "0xec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
    );
    assert_eq!(parse_transaction(&serialized).unwrap(), TransactionSerializable::Legacy(tx));
}

#[test]
fn test_roundtrip_every_type() {
    roundtrip(TxLegacy { nonce: 3, gas: U256::from(21_000), ..Default::default() }.into());
    roundtrip(
        TxLegacy { chain_id: Some(42), signature: Some(signature()), ..Default::default() }
            .into(),
    );
    roundtrip(TxEip2930 { chain_id: 5, signature: Some(signature()), ..Default::default() }.into());
    roundtrip(TxEip1559 { signature: Some(signature()), ..eip1559() }.into());
    roundtrip(
        TxCip42 {
            chain_id: 42220,
            nonce: 7,
            max_priority_fee_per_gas: U256::from(1),
            max_fee_per_gas: U256::from(5),
            gas: U256::from(100_000),
            fee_currency: Some(address!("765de816845861e75a25fca122bb6898b8b1282a")),
            gateway_fee_recipient: Some(address!("1111111111111111111111111111111111111111")),
            gateway_fee: U256::from(10),
            data: bytes!("deadbeef"),
            signature: Some(signature()),
            ..Default::default()
        }
        .into(),
    );
    roundtrip(
        TxCip64 {
            chain_id: 44787,
            max_fee_per_gas: U256::from(9),
            fee_currency: Some(address!("765de816845861e75a25fca122bb6898b8b1282a")),
            ..Default::default()
        }
        .into(),
    );
}

#[test]
fn test_explicit_signature_overrides_embedded() {
    let tx: TransactionSerializable = TxEip1559 { signature: Some(signature()), ..eip1559() }.into();
    let other = Signature::new(U256::from(1), U256::from(2), false);

    let serialized = serialize_transaction(&tx, Some(&other)).unwrap();
    let parsed = parse_transaction(&serialized).unwrap();
    assert_eq!(parsed.signature(), Some(&other));
}

#[test]
fn test_legacy_v_values() {
    let sig = signature();
    assert_eq!(sig.legacy_v(None), U256::from(28));
    assert_eq!(sig.legacy_v(Some(1)), U256::from(38));

    let (parsed, chain_id) = Signature::from_legacy_v(U256::from(37), sig.r, sig.s).unwrap();
    assert_eq!(chain_id, Some(1));
    assert!(!parsed.y_parity);
    assert!(Signature::from_legacy_v(U256::from(30), sig.r, sig.s).is_err());
}

#[test]
fn test_validation_errors() {
    let tip_above_cap = TxEip1559 { max_priority_fee_per_gas: U256::from(3), ..eip1559() };
    assert!(matches!(
        serialize_transaction(&tip_above_cap.into(), None),
        Err(TransactionError::TipAboveFeeCap { .. })
    ));

    let zero_chain = TxEip1559 { chain_id: 0, ..eip1559() };
    assert_eq!(
        serialize_transaction(&zero_chain.into(), None).unwrap_err(),
        TransactionError::InvalidChainId(0)
    );

    let incomplete = TxCip42 {
        chain_id: 42220,
        gateway_fee: U256::from(1),
        ..Default::default()
    };
    assert_eq!(
        serialize_transaction(&incomplete.into(), None).unwrap_err(),
        TransactionError::GatewayFeeIncomplete
    );
}

#[test]
fn test_parse_rejects_unknown_type_and_empty() {
    assert_eq!(parse_transaction(&[]).unwrap_err(), TransactionError::EmptyTransaction);
    assert_eq!(
        parse_transaction(&hex!("03c0")).unwrap_err(),
        TransactionError::InvalidSerializedType(0x03)
    );
    assert_eq!(TxType::from_first_byte(0x7c), Some(TxType::Cip42));
    assert_eq!(TxType::from_name("cip64"), Some(TxType::Cip64));
}

#[test]
fn test_parse_rejects_wrong_field_count() {
    let fields = RlpItem::List(vec![RlpItem::u64(1); 5]);
    let mut data = vec![0x02];
    data.extend_from_slice(&to_rlp(&fields));

    assert_eq!(
        parse_transaction(&data).unwrap_err(),
        TransactionError::InvalidSerializedTransaction {
            tx_type: "eip1559",
            expected: "9 or 12".to_string(),
            given: 5,
        }
    );
}

fn eip1559_fields(y_parity: RlpItem, nonce: RlpItem) -> Vec<u8> {
    let fields = RlpItem::List(vec![
        RlpItem::u64(1),
        nonce,
        RlpItem::EMPTY,
        RlpItem::EMPTY,
        RlpItem::EMPTY,
        RlpItem::EMPTY,
        RlpItem::EMPTY,
        RlpItem::EMPTY,
        RlpItem::List(vec![]),
        y_parity,
        RlpItem::u64(1),
        RlpItem::u64(1),
    ]);
    let mut data = vec![0x02];
    data.extend_from_slice(&to_rlp(&fields));
    data
}

#[test]
fn test_parse_rejects_bad_y_parity_and_non_canonical_integers() {
    let bad_parity = eip1559_fields(RlpItem::bytes([2u8]), RlpItem::EMPTY);
    assert_eq!(parse_transaction(&bad_parity).unwrap_err(), TransactionError::InvalidYParity);

    let padded_nonce = eip1559_fields(RlpItem::EMPTY, RlpItem::bytes([0u8, 1]));
    assert_eq!(
        parse_transaction(&padded_nonce).unwrap_err(),
        TransactionError::NonCanonicalInteger("nonce")
    );

    let valid = eip1559_fields(RlpItem::bytes([1u8]), RlpItem::EMPTY);
    let parsed = parse_transaction(&valid).unwrap();
    assert!(parsed.signature().is_some_and(|sig| sig.y_parity));
}

#[test]
fn test_fee_from_hex() {
    assert_eq!(fee_from_hex("0x3b9aca00").unwrap(), U256::from(1_000_000_000u64));
    let max = format!("0x{}", "ff".repeat(32));
    assert_eq!(fee_from_hex(&max).unwrap(), U256::MAX);
    let too_high = format!("0x01{}", "00".repeat(32));
    assert!(matches!(fee_from_hex(&too_high), Err(TransactionError::FeeCapTooHigh(_))));
}
