//! JSON to [`AbiValue`] mapping.
//!
//! Integers are accepted as JSON numbers, decimal strings or `0x` hex strings. Tuples are
//! accepted as arrays (positional) or objects (by component name).

use std::str::FromStr;

use alloy_primitives::{hex, Bytes, I256, U256};
use evmcodec::{checksum_address, from_hex, get_address, AbiValue, ParamType};
use serde_json::{Map, Value};

use crate::FormatError;

fn mismatch(kind: &ParamType, reason: impl Into<String>) -> FormatError {
    FormatError::InvalidAbiJson { ty: kind.canonical(), reason: reason.into() }
}

/// Convert `value` into an [`AbiValue`] of type `kind`.
pub fn value_from_json(kind: &ParamType, value: &Value) -> Result<AbiValue, FormatError> {
    match kind {
        ParamType::Address => {
            let text = value.as_str().ok_or_else(|| mismatch(kind, "expected a string"))?;
            Ok(AbiValue::Address(get_address(text)?))
        }
        ParamType::Bool => match value {
            Value::Bool(flag) => Ok(AbiValue::Bool(*flag)),
            Value::String(text) if text == "true" => Ok(AbiValue::Bool(true)),
            Value::String(text) if text == "false" => Ok(AbiValue::Bool(false)),
            _ => Err(mismatch(kind, "expected a boolean")),
        },
        ParamType::Uint(_) => Ok(AbiValue::Uint(parse_uint(kind, value)?)),
        ParamType::Int(_) => Ok(AbiValue::Int(parse_int(kind, value)?)),
        ParamType::FixedBytes(size) => {
            let bytes = parse_bytes(kind, value)?;
            if bytes.len() != *size {
                return Err(mismatch(kind, format!("expected {size} bytes, given {}", bytes.len())));
            }
            Ok(AbiValue::FixedBytes(bytes))
        }
        ParamType::Bytes => Ok(AbiValue::Bytes(parse_bytes(kind, value)?)),
        ParamType::String => match value {
            Value::String(text) => Ok(AbiValue::String(text.clone())),
            _ => Err(mismatch(kind, "expected a string")),
        },
        ParamType::Array { len, inner } => {
            let items = value.as_array().ok_or_else(|| mismatch(kind, "expected an array"))?;
            if let Some(len) = len {
                if items.len() != *len {
                    return Err(mismatch(kind, format!("expected {len} items, given {}", items.len())));
                }
            }
            let values =
                items.iter().map(|item| value_from_json(inner, item)).collect::<Result<_, _>>()?;
            Ok(AbiValue::Array(values))
        }
        ParamType::Tuple(components) => match value {
            Value::Array(items) => {
                if items.len() != components.len() {
                    return Err(mismatch(
                        kind,
                        format!("expected {} components, given {}", components.len(), items.len()),
                    ));
                }
                let values = components
                    .iter()
                    .zip(items)
                    .map(|(param, item)| value_from_json(&param.kind, item))
                    .collect::<Result<_, _>>()?;
                Ok(AbiValue::Tuple(values))
            }
            Value::Object(object) => {
                let values = components
                    .iter()
                    .map(|param| {
                        let name = param
                            .name
                            .as_deref()
                            .ok_or_else(|| mismatch(kind, "unnamed component in object form"))?;
                        let item = object
                            .get(name)
                            .ok_or_else(|| mismatch(kind, format!("missing component {name}")))?;
                        value_from_json(&param.kind, item)
                    })
                    .collect::<Result<_, _>>()?;
                Ok(AbiValue::Tuple(values))
            }
            _ => Err(mismatch(kind, "expected an array or object")),
        },
    }
}

fn parse_uint(kind: &ParamType, value: &Value) -> Result<U256, FormatError> {
    match value {
        Value::Number(number) => {
            number.as_u64().map(U256::from).ok_or_else(|| mismatch(kind, "expected a non-negative integer"))
        }
        Value::String(text) if text.starts_with("0x") => Ok(from_hex(text, None)?),
        Value::String(text) => U256::from_str_radix(text, 10).map_err(|e| mismatch(kind, e.to_string())),
        _ => Err(mismatch(kind, "expected a number or string")),
    }
}

fn parse_int(kind: &ParamType, value: &Value) -> Result<I256, FormatError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .and_then(|n| I256::try_from(n).ok())
            .ok_or_else(|| mismatch(kind, "expected an integer")),
        Value::String(text) if text.starts_with("0x") => Ok(from_hex(text, None)?),
        Value::String(text) => I256::from_str(text).map_err(|e| mismatch(kind, e.to_string())),
        _ => Err(mismatch(kind, "expected a number or string")),
    }
}

fn parse_bytes(kind: &ParamType, value: &Value) -> Result<Bytes, FormatError> {
    let text = value.as_str().ok_or_else(|| mismatch(kind, "expected a hex string"))?;
    Ok(from_hex(text, None)?)
}

/// JSON view of a decoded value. Integers become decimal strings and addresses are checksummed.
pub fn value_to_json(value: &AbiValue) -> Value {
    match value {
        AbiValue::Address(address) => Value::String(checksum_address(address)),
        AbiValue::Bool(flag) => Value::Bool(*flag),
        AbiValue::Uint(number) => Value::String(number.to_string()),
        AbiValue::Int(number) => Value::String(number.to_string()),
        AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        AbiValue::String(text) => Value::String(text.clone()),
        AbiValue::Tuple(values) | AbiValue::Array(values) => {
            Value::Array(values.iter().map(value_to_json).collect())
        }
        AbiValue::NamedTuple(fields) => {
            let object: Map<String, Value> =
                fields.iter().map(|(name, value)| (name.clone(), value_to_json(value))).collect();
            Value::Object(object)
        }
    }
}
