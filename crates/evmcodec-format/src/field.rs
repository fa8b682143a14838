//! Formatted field values and the transforms that produce them.
//!
//! Every transform has the [`FieldTransform`] signature: it receives the field name (for
//! error reporting) and the raw wire value, and returns the domain value or `None` to drop
//! the field. A JSON `null` passes through every value transform untouched.

use std::collections::BTreeMap;

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use evmcodec::{
    checksum_address, from_hex, get_address,
    transaction::{fee_from_hex, TransactionError},
    TxType,
};
use serde_json::{Map, Value};

use crate::FormatError;

/// A formatted object, keyed by field name.
pub type Formatted = BTreeMap<String, Field>;

/// Per-field transform: `(name, raw) -> Some(field)` or `None` to remove the field.
pub type FieldTransform = fn(&str, &Value) -> Result<Option<Field>, FormatError>;

/// A domain-level field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Passed through without a transform.
    Raw(Value),
    /// Arbitrary precision quantity (wei amounts, gas, fees).
    Quantity(U256),
    /// Quantity known to fit a `u64` (nonces, indices, chain ids).
    Number(u64),
    Address(Address),
    Hash(B256),
    Data(Bytes),
    /// Symbolic value such as a transaction type or receipt status.
    Tag(&'static str),
    Object(Formatted),
    List(Vec<Field>),
}

impl Field {
    /// JSON view of the field. Quantities become decimal strings so no precision is lost.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Raw(value) => value.clone(),
            Self::Quantity(value) => Value::String(value.to_string()),
            Self::Number(value) => Value::from(*value),
            Self::Address(address) => Value::String(checksum_address(address)),
            Self::Hash(hash) => Value::String(hex::encode_prefixed(hash)),
            Self::Data(data) => Value::String(hex::encode_prefixed(data)),
            Self::Tag(tag) => Value::String((*tag).to_string()),
            Self::Object(object) => formatted_to_json(object),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    pub const fn as_quantity(&self) -> Option<U256> {
        match self {
            Self::Quantity(value) => Some(*value),
            Self::Number(value) => Some(U256::from_limbs([*value, 0, 0, 0])),
            _ => None,
        }
    }

    pub const fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    pub const fn as_tag(&self) -> Option<&'static str> {
        match self {
            Self::Tag(tag) => Some(*tag),
            _ => None,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }
}

/// JSON object view of a formatted value.
pub fn formatted_to_json(formatted: &Formatted) -> Value {
    let map: Map<String, Value> =
        formatted.iter().map(|(key, field)| (key.clone(), field.to_json())).collect();
    Value::Object(map)
}

fn hex_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, FormatError> {
    value.as_str().ok_or_else(|| FormatError::invalid(name, "expected a hex string"))
}

/// Hex quantity to [`Field::Quantity`].
pub fn quantity(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    let number: U256 = from_hex(hex_str(name, value)?, None)?;
    Ok(Some(Field::Quantity(number)))
}

/// Hex quantity to [`Field::Number`].
pub fn number(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    let number: U256 = from_hex(hex_str(name, value)?, None)?;
    let number = u64::try_from(number).map_err(|_| FormatError::invalid(name, "exceeds u64"))?;
    Ok(Some(Field::Number(number)))
}

/// Fee quantity; anything wider than 256 bits is [`TransactionError::FeeCapTooHigh`].
pub fn fee(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    Ok(Some(Field::Quantity(fee_from_hex(hex_str(name, value)?)?)))
}

pub fn address(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    Ok(Some(Field::Address(get_address(hex_str(name, value)?)?)))
}

pub fn hash(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    let bytes: Bytes = from_hex(hex_str(name, value)?, None)?;
    if bytes.len() != 32 {
        return Err(FormatError::invalid(name, format!("expected 32 bytes, given {}", bytes.len())));
    }
    Ok(Some(Field::Hash(B256::from_slice(&bytes))))
}

pub fn data(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    Ok(Some(Field::Data(from_hex(hex_str(name, value)?, None)?)))
}

/// Celo fee currency token address.
pub fn fee_currency(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    let text = hex_str(name, value)?;
    let currency =
        get_address(text).map_err(|_| TransactionError::InvalidFeeCurrency(text.to_string()))?;
    Ok(Some(Field::Address(currency)))
}

/// Removes the field.
pub fn remove(_name: &str, _value: &Value) -> Result<Option<Field>, FormatError> {
    Ok(None)
}

/// Accepts the RPC quantity (`0x2`) or the tag itself (`eip1559`).
fn tx_type_from_rpc(name: &str, value: &Value) -> Result<Option<TxType>, FormatError> {
    let text = hex_str(name, value)?;
    if let Some(ty) = TxType::from_name(text) {
        return Ok(Some(ty));
    }
    let raw: U256 = from_hex(text, None)?;
    Ok(u8::try_from(raw).ok().and_then(|byte| match byte {
        0x00 => Some(TxType::Legacy),
        other => TxType::from_first_byte(other).filter(|ty| *ty != TxType::Legacy),
    }))
}

/// RPC type quantity to `legacy`, `eip2930` or `eip1559`. Other types pass through raw.
pub fn ethereum_tx_type(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    Ok(Some(match tx_type_from_rpc(name, value)? {
        Some(ty @ (TxType::Legacy | TxType::Eip2930 | TxType::Eip1559)) => Field::Tag(ty.as_str()),
        _ => Field::Raw(value.clone()),
    }))
}

/// [`ethereum_tx_type`] plus the Celo `cip42` and `cip64` tags.
pub fn celo_tx_type(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    Ok(Some(match tx_type_from_rpc(name, value)? {
        Some(ty) => Field::Tag(ty.as_str()),
        None => Field::Raw(value.clone()),
    }))
}

/// Receipt status `0x1`/`0x0` to `success`/`reverted`.
pub fn receipt_status(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    if value.is_null() {
        return Ok(Some(Field::Raw(Value::Null)));
    }
    let status: U256 = from_hex(hex_str(name, value)?, None)?;
    if status == U256::from(1) {
        Ok(Some(Field::Tag("success")))
    } else if status.is_zero() {
        Ok(Some(Field::Tag("reverted")))
    } else {
        Err(FormatError::invalid(name, "status must be 0x0 or 0x1"))
    }
}

/// Celo block randomness `{ committed, revealed }`.
pub fn randomness(name: &str, value: &Value) -> Result<Option<Field>, FormatError> {
    let Some(object) = value.as_object() else {
        return Ok(Some(Field::Raw(value.clone())));
    };
    let mut out = Formatted::new();
    for (key, entry) in object {
        let field = data(name, entry)?.unwrap_or(Field::Raw(Value::Null));
        out.insert(key.clone(), field);
    }
    Ok(Some(Field::Object(out)))
}
