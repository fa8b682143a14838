//! Non-standard packed encoding (`abi.encodePacked`).
//!
//! Values are concatenated at their natural width without offsets or length prefixes.
//! Inside arrays, every element is padded to 32 bytes.

use alloy_primitives::Bytes;

use super::encode::{check_int, check_uint};
use super::{AbiError, AbiValue, ParamType};

/// Packed encoding of `values` against `types`.
pub fn encode_packed(types: &[ParamType], values: &[AbiValue]) -> Result<Bytes, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::LengthMismatch { expected: types.len(), given: values.len() });
    }

    let mut out = Vec::new();
    for (kind, value) in types.iter().zip(values) {
        encode_packed_value(kind, value, false, &mut out)?;
    }
    Ok(Bytes::from(out))
}

fn encode_packed_value(
    kind: &ParamType,
    value: &AbiValue,
    in_array: bool,
    out: &mut Vec<u8>,
) -> Result<(), AbiError> {
    match (kind, value) {
        (ParamType::Address, AbiValue::Address(address)) => {
            if in_array {
                out.extend_from_slice(&[0u8; 12]);
            }
            out.extend_from_slice(address.as_slice());
        }
        (ParamType::Bool, AbiValue::Bool(flag)) => {
            if in_array {
                out.extend_from_slice(&[0u8; 31]);
            }
            out.push(*flag as u8);
        }
        (ParamType::Uint(bits), AbiValue::Uint(number)) => {
            check_uint(*number, *bits)?;
            let width = if in_array { 32 } else { bits / 8 };
            out.extend_from_slice(&number.to_be_bytes::<32>()[32 - width..]);
        }
        (ParamType::Int(bits), AbiValue::Int(number)) => {
            check_int(*number, *bits)?;
            let width = if in_array { 32 } else { bits / 8 };
            out.extend_from_slice(&number.into_raw().to_be_bytes::<32>()[32 - width..]);
        }
        (ParamType::FixedBytes(size), AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes)) => {
            if bytes.len() != *size {
                return Err(AbiError::BytesSizeMismatch { expected: *size, given: bytes.len() });
            }
            out.extend_from_slice(bytes);
            if in_array {
                out.resize(out.len() + 32 - size, 0);
            }
        }
        (ParamType::Bytes, AbiValue::Bytes(bytes) | AbiValue::FixedBytes(bytes)) => {
            out.extend_from_slice(bytes)
        }
        (ParamType::String, AbiValue::String(string)) => out.extend_from_slice(string.as_bytes()),
        (ParamType::Array { len, inner }, AbiValue::Array(values)) => {
            if let Some(len) = len {
                if *len != values.len() {
                    return Err(AbiError::ArrayLengthMismatch {
                        ty: kind.canonical(),
                        expected: *len,
                        given: values.len(),
                    });
                }
            }
            for value in values {
                encode_packed_value(inner, value, true, out)?;
            }
        }
        (ParamType::Tuple(_), _) => return Err(AbiError::UnsupportedPackedType(kind.canonical())),
        (kind, value) => {
            return Err(AbiError::TypeMismatch { expected: kind.canonical(), given: value.kind() })
        }
    }
    Ok(())
}
