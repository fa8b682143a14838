//! Call data, return data and deploy data.

use alloy_primitives::{hex, Bytes};
use evmcodec_types::{AbiFunction, AbiItem};

use super::{
    decode_abi_parameters, encode_abi_parameters, item_selector, params_from_abi, AbiError,
    AbiValue,
};

/// A function call decoded from call data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFunctionCall {
    pub name: String,
    pub args: Vec<AbiValue>,
}

/// Look up a function by name.
///
/// With several overloads, `args` picks the first one whose inputs structurally accept the
/// arguments; without `args` the first overload wins.
pub fn find_function<'a>(
    abi: &'a [AbiItem],
    name: &str,
    args: Option<&[AbiValue]>,
) -> Result<&'a AbiFunction, AbiError> {
    let mut candidates = abi.iter().filter_map(|item| match item {
        AbiItem::Function(function) if function.name == name => Some(function),
        _ => None,
    });
    let first = candidates.next().ok_or_else(|| AbiError::FunctionNotFound(name.to_string()))?;

    let Some(args) = args else {
        return Ok(first);
    };
    let accepts = |function: &AbiFunction| {
        function.inputs.len() == args.len()
            && params_from_abi(&function.inputs).is_ok_and(|params| {
                params.iter().zip(args).all(|(param, arg)| arg.matches(&param.kind))
            })
    };

    if accepts(first) {
        return Ok(first);
    }
    Ok(candidates.find(|function| accepts(function)).unwrap_or(first))
}

/// Selector followed by the encoded arguments.
pub fn encode_function_data(
    abi: &[AbiItem],
    name: &str,
    args: &[AbiValue],
) -> Result<Bytes, AbiError> {
    let function = find_function(abi, name, Some(args))?;
    let selector = item_selector(&AbiItem::Function(function.clone()))?;
    let params = params_from_abi(&function.inputs)?;
    let encoded = encode_abi_parameters(&params, args)?;

    let mut out = Vec::with_capacity(4 + encoded.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(&encoded);
    Ok(Bytes::from(out))
}

/// Match the 4-byte prefix of `data` against the ABI's functions and decode the arguments.
pub fn decode_function_data(abi: &[AbiItem], data: &[u8]) -> Result<DecodedFunctionCall, AbiError> {
    let Some(selector) = data.get(..4) else {
        return Err(AbiError::FunctionSignatureNotFound(hex::encode_prefixed(data)));
    };

    for item in abi {
        let AbiItem::Function(function) = item else { continue };
        if item_selector(item)? != selector {
            continue;
        }
        tracing::debug!(name = %function.name, "matched function selector");
        let params = params_from_abi(&function.inputs)?;
        let args = decode_abi_parameters(&params, &data[4..])?;
        return Ok(DecodedFunctionCall { name: function.name.clone(), args });
    }
    Err(AbiError::FunctionSignatureNotFound(hex::encode_prefixed(selector)))
}

/// Encode return values of `name`.
pub fn encode_function_result(
    abi: &[AbiItem],
    name: &str,
    values: &[AbiValue],
) -> Result<Bytes, AbiError> {
    let function = find_function(abi, name, None)?;
    encode_abi_parameters(&params_from_abi(&function.outputs)?, values)
}

/// Decode return data of `name`.
pub fn decode_function_result(
    abi: &[AbiItem],
    name: &str,
    data: &[u8],
) -> Result<Vec<AbiValue>, AbiError> {
    let function = find_function(abi, name, None)?;
    decode_abi_parameters(&params_from_abi(&function.outputs)?, data)
}

/// Contract creation payload: `bytecode` followed by the encoded constructor arguments.
pub fn encode_deploy_data(
    abi: &[AbiItem],
    bytecode: &[u8],
    args: &[AbiValue],
) -> Result<Bytes, AbiError> {
    let constructor = abi.iter().find_map(|item| match item {
        AbiItem::Constructor(constructor) => Some(constructor),
        _ => None,
    });

    let encoded = match constructor {
        Some(constructor) => encode_abi_parameters(&params_from_abi(&constructor.inputs)?, args)?,
        None if args.is_empty() => Bytes::new(),
        None => return Err(AbiError::ConstructorNotFound),
    };

    let mut out = Vec::with_capacity(bytecode.len() + encoded.len());
    out.extend_from_slice(bytecode);
    out.extend_from_slice(&encoded);
    Ok(Bytes::from(out))
}
