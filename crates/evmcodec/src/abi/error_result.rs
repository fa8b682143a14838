//! Revert data: `Error(string)`, `Panic(uint256)` and custom ABI errors.

use alloy_primitives::{hex, Bytes, U256};
use evmcodec_types::AbiItem;

use super::{
    decode_abi_parameters, encode_abi_parameters, item_selector, params_from_abi, AbiError,
    AbiValue, Param, ParamType, Selector,
};

/// Selector of `Error(string)`.
pub const ERROR_SELECTOR: Selector = [0x08, 0xc3, 0x79, 0xa0];

/// Selector of `Panic(uint256)`.
pub const PANIC_SELECTOR: Selector = [0x4e, 0x48, 0x7b, 0x71];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedError {
    /// `require(false, "reason")` / `revert("reason")`.
    Revert(String),
    /// Compiler inserted panic; `reason` is known for the codes Solidity documents.
    Panic { code: U256, reason: Option<&'static str> },
    Custom { name: String, args: Vec<AbiValue> },
}

/// Human readable description of a Solidity panic code.
pub fn panic_reason(code: U256) -> Option<&'static str> {
    let code = u64::try_from(code).ok()?;
    Some(match code {
        0x01 => "An `assert` condition failed.",
        0x11 => "Arithmetic operation resulted in underflow or overflow.",
        0x12 => "Division or modulo by zero (e.g. `5 / 0` or `23 % 0`).",
        0x21 => "Attempted to convert to an invalid type.",
        0x22 => "Attempted to access a storage byte array that is incorrectly encoded.",
        0x31 => "Performed `.pop()` on an empty array",
        0x32 => "Array index is out of bounds.",
        0x41 => "Allocated too much memory or created an array which is too large.",
        0x51 => "Attempted to call a zero-initialized variable of internal function type.",
        _ => return None,
    })
}

/// Decode revert data. Built-in errors are recognised without an ABI entry.
pub fn decode_error_result(abi: &[AbiItem], data: &[u8]) -> Result<DecodedError, AbiError> {
    if data.is_empty() {
        return Err(AbiError::ZeroData);
    }
    let Some(selector) = data.get(..4) else {
        return Err(AbiError::ErrorSignatureNotFound(hex::encode_prefixed(data)));
    };
    let payload = &data[4..];

    if selector == ERROR_SELECTOR {
        let values = decode_abi_parameters(&[Param::new(ParamType::String)], payload)?;
        if let Some(AbiValue::String(reason)) = values.into_iter().next() {
            return Ok(DecodedError::Revert(reason));
        }
    }
    if selector == PANIC_SELECTOR {
        let values = decode_abi_parameters(&[Param::new(ParamType::Uint(256))], payload)?;
        if let Some(AbiValue::Uint(code)) = values.into_iter().next() {
            return Ok(DecodedError::Panic { code, reason: panic_reason(code) });
        }
    }

    for item in abi {
        let AbiItem::Error(error) = item else { continue };
        if item_selector(item)? == selector {
            let args = decode_abi_parameters(&params_from_abi(&error.inputs)?, payload)?;
            return Ok(DecodedError::Custom { name: error.name.clone(), args });
        }
    }
    Err(AbiError::ErrorSignatureNotFound(hex::encode_prefixed(selector)))
}

/// Encode revert data for the error `name`, falling back to the built-ins `Error` and `Panic`.
pub fn encode_error_result(
    abi: &[AbiItem],
    name: &str,
    args: &[AbiValue],
) -> Result<Bytes, AbiError> {
    let declared = abi.iter().find_map(|item| match item {
        AbiItem::Error(error) if error.name == name => Some(error.clone()),
        _ => None,
    });

    let (selector, params) = match (declared, name) {
        (Some(error), _) => {
            let params = params_from_abi(&error.inputs)?;
            (item_selector(&AbiItem::Error(error))?, params)
        }
        (None, "Error") => (ERROR_SELECTOR, vec![Param::new(ParamType::String)]),
        (None, "Panic") => (PANIC_SELECTOR, vec![Param::new(ParamType::Uint(256))]),
        (None, _) => return Err(AbiError::ErrorNotFound(name.to_string())),
    };

    let encoded = encode_abi_parameters(&params, args)?;
    let mut out = Vec::with_capacity(4 + encoded.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(&encoded);
    Ok(Bytes::from(out))
}

