use crate::{
    abi::{encode_abi_parameters, AbiError, AbiValue, Param, ParamType},
    hex::HexError,
};
use alloy_primitives::{address, hex, Bytes, I256, U256};

/// Split an encoding into 32-byte words rendered as hex, for readable assertions.
fn words(encoded: &[u8]) -> Vec<String> {
    encoded.chunks(32).map(hex::encode).collect()
}

fn word_u(value: u64) -> String {
    format!("{value:064x}")
}

fn word_text(text: &str) -> String {
    let mut out = hex::encode(text);
    out.push_str(&"0".repeat(64 - out.len()));
    out
}

#[test]
fn test_string_then_uint_puts_offset_first() {
    let params = Param::parse_list("string,uint256").unwrap();
    let encoded =
        encode_abi_parameters(&params, &[AbiValue::from("wagmi"), AbiValue::from(420u64)]).unwrap();

    assert_eq!(
        words(&encoded),
        vec![word_u(0x40), word_u(420), word_u(5), word_text("wagmi")]
    );
}

#[test]
fn test_dynamic_uint_array_layout() {
    let params = Param::parse_list("uint256[]").unwrap();
    let values = [AbiValue::Array(vec![420u64.into(), 69u64.into(), 22u64.into(), 55u64.into()])];
    let encoded = encode_abi_parameters(&params, &values).unwrap();

    assert_eq!(
        words(&encoded),
        vec![word_u(0x20), word_u(4), word_u(0x1a4), word_u(0x45), word_u(0x16), word_u(0x37)]
    );
}

#[test]
fn test_int8_boundaries() {
    let params = [Param::new(ParamType::Int(8))];

    let minus_one = encode_abi_parameters(&params, &[AbiValue::Int(I256::MINUS_ONE)]).unwrap();
    assert_eq!(&minus_one[..], [0xff; 32]);

    let max = encode_abi_parameters(&params, &[AbiValue::Int(I256::try_from(127i64).unwrap())])
        .unwrap();
    assert_eq!(words(&max), vec![word_u(0x7f)]);

    let err = encode_abi_parameters(&params, &[AbiValue::Int(I256::try_from(128i64).unwrap())])
        .unwrap_err();
    assert!(matches!(err, AbiError::Hex(HexError::IntegerOutOfRange { signed: true, .. })));
}

#[test]
fn test_uint8_overflow() {
    let params = [Param::new(ParamType::Uint(8))];
    let err = encode_abi_parameters(&params, &[AbiValue::from(256u64)]).unwrap_err();
    assert!(matches!(err, AbiError::Hex(HexError::IntegerOutOfRange { signed: false, .. })));
}

#[test]
fn test_solidity_docs_f_example() {
    // f(uint256,uint32[],bytes10,bytes) with (0x123, [0x456, 0x789], "1234567890", "Hello, world!")
    let params = Param::parse_list("uint256,uint32[],bytes10,bytes").unwrap();
    let values = [
        AbiValue::from(0x123u64),
        AbiValue::Array(vec![0x456u64.into(), 0x789u64.into()]),
        AbiValue::FixedBytes(Bytes::from_static(b"1234567890")),
        AbiValue::Bytes(Bytes::from_static(b"Hello, world!")),
    ];
    let encoded = encode_abi_parameters(&params, &values).unwrap();

    assert_eq!(
        words(&encoded),
        vec![
            word_u(0x123),
            word_u(0x80),
            word_text("1234567890"),
            word_u(0xe0),
            word_u(2),
            word_u(0x456),
            word_u(0x789),
            word_u(0xd),
            word_text("Hello, world!"),
        ]
    );
}

#[test]
fn test_solidity_docs_g_example() {
    // g(uint256[][],string[]) with ([[1, 2], [3]], ["one", "two", "three"])
    let params = Param::parse_list("uint256[][],string[]").unwrap();
    let values = [
        AbiValue::Array(vec![
            AbiValue::Array(vec![1u64.into(), 2u64.into()]),
            AbiValue::Array(vec![3u64.into()]),
        ]),
        AbiValue::Array(vec!["one".into(), "two".into(), "three".into()]),
    ];
    let encoded = encode_abi_parameters(&params, &values).unwrap();

    assert_eq!(
        words(&encoded),
        vec![
            word_u(0x40),
            word_u(0x140),
            word_u(2),
            word_u(0x40),
            word_u(0xa0),
            word_u(2),
            word_u(1),
            word_u(2),
            word_u(1),
            word_u(3),
            word_u(3),
            word_u(0x60),
            word_u(0xa0),
            word_u(0xe0),
            word_u(3),
            word_text("one"),
            word_u(3),
            word_text("two"),
            word_u(5),
            word_text("three"),
        ]
    );
}

#[test]
fn test_static_tuple_is_inline() {
    let params = Param::parse_list("(address,bool)").unwrap();
    let owner = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
    let encoded =
        encode_abi_parameters(&params, &[AbiValue::Tuple(vec![owner.into(), true.into()])])
            .unwrap();

    assert_eq!(encoded.len(), 64);
    assert_eq!(&encoded[12..32], owner.as_slice());
    assert_eq!(words(&encoded)[1], word_u(1));
}

#[test]
fn test_named_tuple_matches_by_name() {
    let params = Param::parse_list("(uint256 amount, string memo)").unwrap();
    let by_name = AbiValue::NamedTuple(vec![
        ("memo".to_string(), "hi".into()),
        ("amount".to_string(), 7u64.into()),
    ]);
    let positional = AbiValue::Tuple(vec![7u64.into(), "hi".into()]);

    assert_eq!(
        encode_abi_parameters(&params, &[by_name]).unwrap(),
        encode_abi_parameters(&params, &[positional]).unwrap()
    );

    let missing = AbiValue::NamedTuple(vec![("amount".to_string(), 7u64.into())]);
    assert_eq!(
        encode_abi_parameters(&params, &[missing]).unwrap_err(),
        AbiError::NamedTupleFieldMissing("memo".to_string())
    );
}

#[test]
fn test_dynamic_tuple_gets_offset() {
    let params = Param::parse_list("uint8,(string,uint8)").unwrap();
    let values = [AbiValue::from(1u64), AbiValue::Tuple(vec!["a".into(), 2u64.into()])];
    let encoded = encode_abi_parameters(&params, &values).unwrap();

    assert_eq!(
        words(&encoded),
        vec![word_u(1), word_u(0x40), word_u(0x40), word_u(2), word_u(1), word_text("a")]
    );
}

#[test]
fn test_fixed_array_of_dynamic_is_dynamic() {
    let params = Param::parse_list("string[2]").unwrap();
    assert!(params[0].kind.is_dynamic());

    let encoded =
        encode_abi_parameters(&params, &[AbiValue::Array(vec!["a".into(), "b".into()])]).unwrap();
    // offset to the array, then two element offsets with no count prefix
    assert_eq!(&words(&encoded)[..3], &[word_u(0x20), word_u(0x40), word_u(0x80)]);
}

#[test]
fn test_encode_errors() {
    let params = Param::parse_list("uint256,bool").unwrap();
    assert_eq!(
        encode_abi_parameters(&params, &[AbiValue::from(1u64)]).unwrap_err(),
        AbiError::LengthMismatch { expected: 2, given: 1 }
    );
    assert_eq!(
        encode_abi_parameters(&params, &[AbiValue::from(1u64), AbiValue::from("yes")])
            .unwrap_err(),
        AbiError::TypeMismatch { expected: "bool".to_string(), given: "string" }
    );

    let fixed = Param::parse_list("uint8[2]").unwrap();
    assert!(matches!(
        encode_abi_parameters(&fixed, &[AbiValue::Array(vec![1u64.into()])]),
        Err(AbiError::ArrayLengthMismatch { expected: 2, given: 1, .. })
    ));

    let bytes4 = [Param::new(ParamType::FixedBytes(4))];
    assert_eq!(
        encode_abi_parameters(&bytes4, &[AbiValue::FixedBytes(Bytes::from_static(&[1, 2]))])
            .unwrap_err(),
        AbiError::BytesSizeMismatch { expected: 4, given: 2 }
    );
}

#[test]
fn test_zero_values_encode_as_zero_words() {
    let params = Param::parse_list("uint256,bool,address").unwrap();
    let values = [
        AbiValue::Uint(U256::ZERO),
        AbiValue::Bool(false),
        AbiValue::Address(Default::default()),
    ];
    let encoded = encode_abi_parameters(&params, &values).unwrap();
    assert_eq!(&encoded[..], [0u8; 96]);
}
