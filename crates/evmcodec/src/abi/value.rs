use alloy_primitives::{Address, Bytes, I256, U256};

use super::ParamType;

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Bool(bool),
    Uint(U256),
    Int(I256),
    FixedBytes(Bytes),
    Bytes(Bytes),
    String(String),
    Tuple(Vec<AbiValue>),
    /// A tuple whose components all carry names, in declaration order.
    NamedTuple(Vec<(String, AbiValue)>),
    Array(Vec<AbiValue>),
}

impl AbiValue {
    /// Short label of the variant, used in type mismatch errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Bool(_) => "bool",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Tuple(_) => "tuple",
            Self::NamedTuple(_) => "named tuple",
            Self::Array(_) => "array",
        }
    }

    /// Structural check that this value could be encoded as `kind`.
    ///
    /// Integer ranges and byte widths are not checked here; the encoder reports those.
    pub fn matches(&self, kind: &ParamType) -> bool {
        match (kind, self) {
            (ParamType::Address, Self::Address(_))
            | (ParamType::Bool, Self::Bool(_))
            | (ParamType::Uint(_), Self::Uint(_))
            | (ParamType::Int(_), Self::Int(_))
            | (ParamType::String, Self::String(_))
            | (ParamType::FixedBytes(_), Self::FixedBytes(_) | Self::Bytes(_))
            | (ParamType::Bytes, Self::Bytes(_) | Self::FixedBytes(_)) => true,
            (ParamType::Tuple(params), Self::Tuple(values)) => {
                params.len() == values.len()
                    && params.iter().zip(values).all(|(p, v)| v.matches(&p.kind))
            }
            (ParamType::Tuple(params), Self::NamedTuple(fields)) => params.iter().all(|p| {
                fields.iter().any(|(name, v)| p.name.as_deref() == Some(name) && v.matches(&p.kind))
            }),
            (ParamType::Array { len, inner }, Self::Array(values)) => {
                len.is_none_or(|len| len == values.len()) && values.iter().all(|v| v.matches(inner))
            }
            _ => false,
        }
    }

    pub const fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Raw bytes of `bytes` and `bytesN` values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(value) | Self::FixedBytes(value) => Some(value),
            _ => None,
        }
    }

    /// Elements of arrays and positional tuples.
    pub fn as_slice(&self) -> Option<&[AbiValue]> {
        match self {
            Self::Array(values) | Self::Tuple(values) => Some(values),
            _ => None,
        }
    }

    /// Field lookup on a named tuple.
    pub fn get(&self, name: &str) -> Option<&AbiValue> {
        match self {
            Self::NamedTuple(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<u64> for AbiValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<I256> for AbiValue {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Bytes> for AbiValue {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<AbiValue>> for AbiValue {
    fn from(value: Vec<AbiValue>) -> Self {
        Self::Array(value)
    }
}
