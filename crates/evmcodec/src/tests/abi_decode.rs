use crate::abi::{
    decode_abi_parameters, encode_abi_parameters, params_from_abi, AbiError, AbiValue, Param,
};
use alloy_primitives::{address, hex, Bytes, I256, U256};
use evmcodec_types::AbiParameter;

#[test]
fn test_decode_string_and_uint() {
    let params = Param::parse_list("string,uint256").unwrap();
    let data = hex::decode(concat!(
        "0000000000000000000000000000000000000000000000000000000000000040",
        "00000000000000000000000000000000000000000000000000000000000001a4",
        "0000000000000000000000000000000000000000000000000000000000000005",
        "7761676d69000000000000000000000000000000000000000000000000000000",
    ))
    .unwrap();

    let values = decode_abi_parameters(&params, &data).unwrap();
    assert_eq!(values, vec![AbiValue::from("wagmi"), AbiValue::from(420u64)]);
}

#[test]
fn test_roundtrip_nested_dynamic() {
    let params = Param::parse_list("uint256[][],string[],(address,bytes)[2],int16").unwrap();
    let owner = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
    let values = vec![
        AbiValue::Array(vec![
            AbiValue::Array(vec![1u64.into(), 2u64.into()]),
            AbiValue::Array(vec![]),
        ]),
        AbiValue::Array(vec!["one".into(), "".into()]),
        AbiValue::Array(vec![
            AbiValue::Tuple(vec![owner.into(), Bytes::from_static(&[0xde, 0xad]).into()]),
            AbiValue::Tuple(vec![owner.into(), Bytes::new().into()]),
        ]),
        AbiValue::Int(I256::try_from(-300i64).unwrap()),
    ];

    let encoded = encode_abi_parameters(&params, &values).unwrap();
    assert_eq!(decode_abi_parameters(&params, &encoded).unwrap(), values);
}

#[test]
fn test_named_components_decode_as_named_tuple() {
    let abi_params = vec![AbiParameter::tuple(
        "tuple",
        vec![AbiParameter::named("id", "uint64"), AbiParameter::named("active", "bool")],
    )];
    let params = params_from_abi(&abi_params).unwrap();

    let encoded =
        encode_abi_parameters(&params, &[AbiValue::Tuple(vec![9u64.into(), true.into()])]).unwrap();
    let decoded = decode_abi_parameters(&params, &encoded).unwrap();

    assert_eq!(decoded[0].get("id"), Some(&AbiValue::from(9u64)));
    assert_eq!(decoded[0].get("active"), Some(&AbiValue::Bool(true)));

    // a single unnamed component keeps the whole tuple positional
    let partial = Param::parse_list("(uint64 id, bool)").unwrap();
    let decoded = decode_abi_parameters(&partial, &encoded).unwrap();
    assert_eq!(decoded[0], AbiValue::Tuple(vec![9u64.into(), true.into()]));
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let params = Param::parse_list("uint8").unwrap();
    let mut data = vec![0u8; 64];
    data[31] = 7;
    data[63] = 0xff;
    assert_eq!(decode_abi_parameters(&params, &data).unwrap(), vec![AbiValue::from(7u64)]);
}

#[test]
fn test_decode_errors() {
    let params = Param::parse_list("uint256,bool").unwrap();
    assert_eq!(decode_abi_parameters(&params, &[]).unwrap_err(), AbiError::ZeroData);
    assert_eq!(
        decode_abi_parameters(&params, &[0u8; 40]).unwrap_err(),
        AbiError::DataSizeTooSmall { expected: 64, given: 40 }
    );
    assert!(decode_abi_parameters(&[], &[]).unwrap().is_empty());

    let mut bad_bool = [0u8; 64];
    bad_bool[63] = 2;
    assert_eq!(decode_abi_parameters(&params, &bad_bool).unwrap_err(), AbiError::InvalidBool);
}

#[test]
fn test_offset_out_of_bounds() {
    let params = Param::parse_list("string").unwrap();
    let mut data = [0u8; 64];
    data[31] = 0xff;
    assert!(matches!(
        decode_abi_parameters(&params, &data),
        Err(AbiError::OffsetOutOfBounds { size: 64, .. })
    ));
}

#[test]
fn test_huge_array_count_is_rejected() {
    let params = Param::parse_list("uint256[]").unwrap();
    let mut data = [0u8; 64];
    data[31] = 0x20;
    data[62] = 0x10; // count 0x1000 with no element data
    assert!(matches!(
        decode_abi_parameters(&params, &data),
        Err(AbiError::OffsetOutOfBounds { .. } | AbiError::DataSizeTooSmall { .. })
    ));
}

#[test]
fn test_fixed_bytes_and_negative_int() {
    let params = Param::parse_list("bytes4,int256").unwrap();
    let values = vec![
        AbiValue::FixedBytes(Bytes::from_static(&[0xca, 0xfe, 0xba, 0xbe])),
        AbiValue::Int(I256::MINUS_ONE),
    ];
    let encoded = encode_abi_parameters(&params, &values).unwrap();
    assert_eq!(&encoded[..4], &[0xca, 0xfe, 0xba, 0xbe]);
    assert_eq!(decode_abi_parameters(&params, &encoded).unwrap(), values);
    assert_eq!(values[1].as_int().map(|v| v.into_raw()), Some(U256::MAX));
}

#[test]
fn test_oversized_fixed_array_is_rejected() {
    let data = [0u8; 64];
    for ty in [
        "uint256[576460752303423488]",
        "uint256[0][576460752303423488]",
        "(uint256[576460752303423488],string)",
    ] {
        let params = Param::parse_list(ty).unwrap();
        assert!(
            matches!(
                decode_abi_parameters(&params, &data),
                Err(AbiError::DataSizeTooSmall { .. } | AbiError::OffsetOutOfBounds { .. })
            ),
            "{ty} should fail"
        );
    }
}

fn push_word(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&U256::from(value).to_be_bytes::<32>());
}

/// `uint256[][]` whose outer elements all point at one shared inner array.
fn aliased_nested_array(outer: usize, inner: usize) -> Vec<u8> {
    let mut data = Vec::new();
    push_word(&mut data, 0x20);
    push_word(&mut data, outer);
    for _ in 0..outer {
        push_word(&mut data, 32 * outer);
    }
    push_word(&mut data, inner);
    for i in 0..inner {
        push_word(&mut data, i);
    }
    data
}

#[test]
fn test_shared_tails_are_bounded() {
    let params = Param::parse_list("uint256[][]").unwrap();

    let small = decode_abi_parameters(&params, &aliased_nested_array(2, 2)).unwrap();
    let shared = AbiValue::Array(vec![0u64.into(), 1u64.into()]);
    assert_eq!(small, vec![AbiValue::Array(vec![shared.clone(), shared])]);

    let data = aliased_nested_array(100, 100);
    assert_eq!(
        decode_abi_parameters(&params, &data).unwrap_err(),
        AbiError::DecodeLimitExceeded { limit: data.len() }
    );
}
