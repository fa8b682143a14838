//! Head/tail ABI encoder.

use alloy_primitives::{Bytes, I256, U256};

use super::{AbiError, AbiValue, Param, ParamType};
use crate::hex::{int_bounds, uint_max, HexError};

/// One parameter after encoding, before it is placed in a head/tail region.
#[derive(Debug)]
pub(crate) struct PreparedParam {
    pub dynamic: bool,
    pub encoded: Vec<u8>,
}

/// Encode `values` against `params` as a single head/tail region.
pub fn encode_abi_parameters(params: &[Param], values: &[AbiValue]) -> Result<Bytes, AbiError> {
    if params.len() != values.len() {
        return Err(AbiError::LengthMismatch { expected: params.len(), given: values.len() });
    }

    let prepared = params
        .iter()
        .zip(values)
        .map(|(param, value)| prepare_param(&param.kind, value))
        .collect::<Result<Vec<_>, _>>()?;

    let encoded = encode_params(&prepared);
    tracing::trace!(params = params.len(), size = encoded.len(), "encoded abi parameters");
    Ok(Bytes::from(encoded))
}

pub(crate) fn prepare_param(kind: &ParamType, value: &AbiValue) -> Result<PreparedParam, AbiError> {
    let encoded = match (kind, value) {
        (ParamType::Address, AbiValue::Address(address)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_slice());
            word.to_vec()
        }
        (ParamType::Bool, AbiValue::Bool(flag)) => U256::from(*flag as u8).to_be_bytes::<32>().to_vec(),
        (ParamType::Uint(bits), AbiValue::Uint(number)) => {
            check_uint(*number, *bits)?;
            number.to_be_bytes::<32>().to_vec()
        }
        (ParamType::Int(bits), AbiValue::Int(number)) => {
            check_int(*number, *bits)?;
            number.into_raw().to_be_bytes::<32>().to_vec()
        }
        (ParamType::FixedBytes(size), AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes)) => {
            if bytes.len() != *size {
                return Err(AbiError::BytesSizeMismatch { expected: *size, given: bytes.len() });
            }
            pad_right(bytes)
        }
        (ParamType::Bytes, AbiValue::Bytes(bytes) | AbiValue::FixedBytes(bytes)) => {
            encode_dynamic_bytes(bytes)
        }
        (ParamType::String, AbiValue::String(string)) => encode_dynamic_bytes(string.as_bytes()),
        (ParamType::Tuple(components), AbiValue::Tuple(values)) => {
            if components.len() != values.len() {
                return Err(AbiError::LengthMismatch {
                    expected: components.len(),
                    given: values.len(),
                });
            }
            let prepared = components
                .iter()
                .zip(values)
                .map(|(param, value)| prepare_param(&param.kind, value))
                .collect::<Result<Vec<_>, _>>()?;
            encode_params(&prepared)
        }
        (ParamType::Tuple(components), AbiValue::NamedTuple(fields)) => {
            let prepared = components
                .iter()
                .map(|param| {
                    let name = param.name.as_deref().unwrap_or_default();
                    let value = fields
                        .iter()
                        .find(|(field, _)| field == name)
                        .map(|(_, value)| value)
                        .ok_or_else(|| AbiError::NamedTupleFieldMissing(name.to_string()))?;
                    prepare_param(&param.kind, value)
                })
                .collect::<Result<Vec<_>, _>>()?;
            encode_params(&prepared)
        }
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
            let prepared = values
                .iter()
                .map(|value| prepare_param(inner, value))
                .collect::<Result<Vec<_>, _>>()?;

            let mut encoded = Vec::new();
            if len.is_none() {
                encoded.extend_from_slice(&U256::from(values.len()).to_be_bytes::<32>());
            }
            encoded.extend(encode_params(&prepared));
            encoded
        }
        (kind, value) => {
            return Err(AbiError::TypeMismatch { expected: kind.canonical(), given: value.kind() })
        }
    };

    Ok(PreparedParam { dynamic: kind.is_dynamic(), encoded })
}

/// Lay out prepared params: static values in the head, dynamic ones as offsets into the tail.
///
/// Offsets are relative to the start of the region.
pub(crate) fn encode_params(prepared: &[PreparedParam]) -> Vec<u8> {
    let head_len: usize =
        prepared.iter().map(|p| if p.dynamic { 32 } else { p.encoded.len() }).sum();
    let tail_len: usize = prepared.iter().filter(|p| p.dynamic).map(|p| p.encoded.len()).sum();

    let mut head = Vec::with_capacity(head_len + tail_len);
    let mut tail = Vec::with_capacity(tail_len);
    for param in prepared {
        if param.dynamic {
            let offset = U256::from(head_len + tail.len());
            head.extend_from_slice(&offset.to_be_bytes::<32>());
            tail.extend_from_slice(&param.encoded);
        } else {
            head.extend_from_slice(&param.encoded);
        }
    }
    head.extend(tail);
    head
}

fn encode_dynamic_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + bytes.len().div_ceil(32) * 32);
    out.extend_from_slice(&U256::from(bytes.len()).to_be_bytes::<32>());
    out.extend(pad_right(bytes));
    out
}

/// Right-pad to the next multiple of 32 bytes.
fn pad_right(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.resize(bytes.len().div_ceil(32) * 32, 0);
    out
}

pub(crate) fn check_uint(value: U256, bits: usize) -> Result<(), AbiError> {
    let max = uint_max(bits);
    if value > max {
        return Err(HexError::IntegerOutOfRange {
            value: value.to_string(),
            min: "0".to_string(),
            max: max.to_string(),
            size: Some(bits / 8),
            signed: false,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn check_int(value: I256, bits: usize) -> Result<(), AbiError> {
    let (min, max) = int_bounds(bits);
    if value < min || value > max {
        return Err(HexError::IntegerOutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            size: Some(bits / 8),
            signed: true,
        }
        .into());
    }
    Ok(())
}
