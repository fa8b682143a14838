use crate::abi::{encode_packed, AbiError, AbiValue, ParamType};
use alloy_primitives::{address, hex, I256};

#[test]
fn test_natural_widths() {
    let types = [ParamType::Uint(16), ParamType::Bool, ParamType::String];
    let values = [AbiValue::from(0x0102u64), AbiValue::Bool(true), AbiValue::from("ab")];
    assert_eq!(&encode_packed(&types, &values).unwrap()[..], hex!("0102016162"));
}

#[test]
fn test_address_and_negative_int() {
    let owner = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
    let types = [ParamType::Address, ParamType::Int(16)];
    let values = [AbiValue::Address(owner), AbiValue::Int(I256::MINUS_ONE)];

    let packed = encode_packed(&types, &values).unwrap();
    assert_eq!(packed.len(), 22);
    assert_eq!(&packed[..20], owner.as_slice());
    assert_eq!(&packed[20..], [0xff, 0xff]);
}

#[test]
fn test_array_elements_are_padded() {
    let types = [ParamType::Array { len: None, inner: Box::new(ParamType::Uint(8)) }];
    let values = [AbiValue::Array(vec![1u64.into(), 2u64.into()])];

    let packed = encode_packed(&types, &values).unwrap();
    assert_eq!(packed.len(), 64);
    assert_eq!(packed[31], 1);
    assert_eq!(packed[63], 2);
}

#[test]
fn test_packed_errors() {
    let tuple = [ParamType::Tuple(vec![])];
    assert!(matches!(
        encode_packed(&tuple, &[AbiValue::Tuple(vec![])]),
        Err(AbiError::UnsupportedPackedType(_))
    ));
    assert!(matches!(
        encode_packed(&[ParamType::Uint(8)], &[AbiValue::from(300u64)]),
        Err(AbiError::Hex(_))
    ));
    assert_eq!(
        encode_packed(&[ParamType::Bool], &[]).unwrap_err(),
        AbiError::LengthMismatch { expected: 1, given: 0 }
    );
}
