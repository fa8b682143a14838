//! Head/tail ABI decoder.

use alloy_primitives::{Address, Bytes, I256, U256};

use super::{AbiError, AbiValue, Param, ParamType};

/// Decode `data` against `params`. Trailing bytes after the last value are ignored.
///
/// Offsets may point several values at the same tail; the number of decoded values is
/// capped at one per input byte so such aliasing cannot multiply the work.
pub fn decode_abi_parameters(params: &[Param], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    if params.is_empty() {
        return Ok(Vec::new());
    }
    if data.is_empty() {
        return Err(AbiError::ZeroData);
    }

    let head = params.iter().fold(0usize, |acc, p| acc.saturating_add(p.kind.head_size()));
    if data.len() < head {
        return Err(AbiError::DataSizeTooSmall { expected: head, given: data.len() });
    }

    tracing::trace!(params = params.len(), size = data.len(), "decoding abi parameters");
    let mut decoder = Decoder { budget: data.len(), limit: data.len() };
    decoder.sequence(params.iter().map(|p| &p.kind), data)
}

struct Decoder {
    /// Values still allowed before decoding is aborted.
    budget: usize,
    limit: usize,
}

impl Decoder {
    /// Decode consecutive values laid out in one head/tail region.
    fn sequence<'a>(
        &mut self,
        kinds: impl IntoIterator<Item = &'a ParamType>,
        region: &[u8],
    ) -> Result<Vec<AbiValue>, AbiError> {
        let mut cursor = 0usize;
        let mut values = Vec::new();
        for kind in kinds {
            if kind.is_dynamic() {
                let offset = read_usize(region, cursor)?;
                values.push(self.value(kind, &region[offset..])?);
                cursor = cursor.saturating_add(32);
            } else {
                let start = cursor.min(region.len());
                values.push(self.value(kind, &region[start..])?);
                cursor = cursor.saturating_add(kind.head_size());
            }
        }
        Ok(values)
    }

    fn value(&mut self, kind: &ParamType, data: &[u8]) -> Result<AbiValue, AbiError> {
        self.budget = self
            .budget
            .checked_sub(1)
            .ok_or(AbiError::DecodeLimitExceeded { limit: self.limit })?;

        match kind {
            ParamType::Tuple(components) => {
                let values = self.sequence(components.iter().map(|p| &p.kind), data)?;
                let named = !components.is_empty()
                    && components.iter().all(|p| p.name.as_deref().is_some_and(|n| !n.is_empty()));
                if named {
                    let fields = components
                        .iter()
                        .zip(values)
                        .map(|(p, v)| (p.name.clone().unwrap_or_default(), v))
                        .collect();
                    Ok(AbiValue::NamedTuple(fields))
                } else {
                    Ok(AbiValue::Tuple(values))
                }
            }
            ParamType::Array { len: Some(len), inner } => {
                check_count(*len, inner, data, 0)?;
                Ok(AbiValue::Array(self.sequence(std::iter::repeat_n(&**inner, *len), data)?))
            }
            ParamType::Array { len: None, inner } => {
                let count = read_usize(data, 0)?;
                let body = &data[32..];
                check_count(count, inner, body, 32)?;
                Ok(AbiValue::Array(self.sequence(std::iter::repeat_n(&**inner, count), body)?))
            }
            _ => decode_primitive(kind, data),
        }
    }
}

/// Every element needs at least one head slot; refuse counts the data cannot hold.
fn check_count(count: usize, inner: &ParamType, body: &[u8], prefix: usize) -> Result<(), AbiError> {
    let slot = if inner.is_dynamic() { 32 } else { inner.head_size().max(1) };
    let needed = count.saturating_mul(slot);
    if needed > body.len() {
        return Err(AbiError::DataSizeTooSmall {
            expected: prefix.saturating_add(needed),
            given: prefix + body.len(),
        });
    }
    Ok(())
}

/// Decode a non-composite value whose encoding starts at `data[0]`.
fn decode_primitive(kind: &ParamType, data: &[u8]) -> Result<AbiValue, AbiError> {
    match kind {
        ParamType::Address => {
            let word = read_word(data, 0)?;
            Ok(AbiValue::Address(Address::from_slice(&word[12..])))
        }
        ParamType::Bool => {
            let word = read_word(data, 0)?;
            match U256::from_be_bytes(*word) {
                value if value == U256::ZERO => Ok(AbiValue::Bool(false)),
                value if value == U256::from(1u8) => Ok(AbiValue::Bool(true)),
                _ => Err(AbiError::InvalidBool),
            }
        }
        ParamType::Uint(_) => Ok(AbiValue::Uint(U256::from_be_bytes(*read_word(data, 0)?))),
        ParamType::Int(_) => {
            Ok(AbiValue::Int(I256::from_raw(U256::from_be_bytes(*read_word(data, 0)?))))
        }
        ParamType::FixedBytes(size) => {
            let word = read_word(data, 0)?;
            Ok(AbiValue::FixedBytes(Bytes::copy_from_slice(&word[..*size])))
        }
        ParamType::Bytes => Ok(AbiValue::Bytes(Bytes::copy_from_slice(read_dynamic_bytes(data)?))),
        ParamType::String => {
            let raw = read_dynamic_bytes(data)?;
            let string = std::str::from_utf8(raw).map_err(|_| AbiError::InvalidUtf8)?;
            Ok(AbiValue::String(string.to_string()))
        }
        ParamType::Tuple(_) | ParamType::Array { .. } => {
            Err(AbiError::InvalidAbiType(kind.canonical()))
        }
    }
}

fn read_word(data: &[u8], at: usize) -> Result<&[u8; 32], AbiError> {
    at.checked_add(32)
        .and_then(|end| data.get(at..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(AbiError::DataSizeTooSmall { expected: at.saturating_add(32), given: data.len() })
}

/// Read a length or offset word and bound it by the data it indexes into.
fn read_usize(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let value = U256::from_be_bytes(*read_word(data, at)?);
    usize::try_from(value)
        .ok()
        .filter(|&offset| offset <= data.len())
        .ok_or(AbiError::OffsetOutOfBounds { offset: value, size: data.len() })
}

fn read_dynamic_bytes(data: &[u8]) -> Result<&[u8], AbiError> {
    let len = read_usize(data, 0)?;
    data.get(32..32 + len).ok_or(AbiError::DataSizeTooSmall { expected: 32 + len, given: data.len() })
}
