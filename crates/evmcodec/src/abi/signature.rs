//! Human-readable signatures.
//!
//! Accepts the forms found in Solidity source and most tooling:
//! `function balanceOf(address owner) view returns (uint256)`,
//! `event Transfer(address indexed from, address indexed to, uint256 value)`,
//! `error Unauthorized(address caller)`, `constructor(string name) payable`,
//! as well as bare `name(type,...)` which is read as a function.

use evmcodec_types::{
    Abi, AbiConstructor, AbiCustomError, AbiEvent, AbiFunction, AbiItem, AbiParameter,
    StateMutability,
};

use super::param::{matching_paren, split_top_level};
use super::{params_from_abi, AbiError, Param};

/// Parse one human-readable ABI item.
pub fn parse_abi_item(signature: &str) -> Result<AbiItem, AbiError> {
    let source = signature.trim();
    let invalid = |reason| AbiError::InvalidSignature { signature: source.to_string(), reason };

    let (keyword, rest) = match source.split_once(|c: char| c.is_whitespace() || c == '(') {
        Some((word, _)) if matches!(word, "function" | "event" | "error") => {
            (word, source[word.len()..].trim_start())
        }
        Some((word, _)) if matches!(word, "constructor" | "fallback" | "receive") => (word, source),
        _ => ("function", source),
    };

    let open = rest.find('(').ok_or_else(|| invalid("missing parameter list"))?;
    let close = matching_paren(rest, open).ok_or_else(|| invalid("unbalanced parentheses"))?;
    let name = rest[..open].trim();
    let inputs = to_abi_params(&Param::parse_list(&rest[open + 1..close])?);
    let tail = rest[close + 1..].trim();

    match keyword {
        "function" => {
            if !is_name(name) {
                return Err(invalid("missing function name"));
            }
            let (modifiers, outputs) = match tail.find("returns") {
                Some(at) => {
                    let returns = tail[at + "returns".len()..].trim();
                    if !returns.starts_with('(') || matching_paren(returns, 0) != Some(returns.len() - 1)
                    {
                        return Err(invalid("malformed returns clause"));
                    }
                    let outputs = Param::parse_list(&returns[1..returns.len() - 1])?;
                    (&tail[..at], to_abi_params(&outputs))
                }
                None => (tail, Vec::new()),
            };
            Ok(AbiItem::Function(AbiFunction {
                name: name.to_string(),
                inputs,
                outputs,
                state_mutability: parse_mutability(modifiers),
            }))
        }
        "event" => {
            if !is_name(name) {
                return Err(invalid("missing event name"));
            }
            Ok(AbiItem::Event(AbiEvent {
                name: name.to_string(),
                inputs,
                anonymous: tail.split_whitespace().any(|w| w == "anonymous"),
            }))
        }
        "error" => {
            if !is_name(name) {
                return Err(invalid("missing error name"));
            }
            Ok(AbiItem::Error(AbiCustomError { name: name.to_string(), inputs }))
        }
        "constructor" => Ok(AbiItem::Constructor(AbiConstructor {
            inputs,
            state_mutability: parse_mutability(tail),
        })),
        "fallback" => Ok(AbiItem::Fallback { state_mutability: parse_mutability(tail) }),
        _ => Ok(AbiItem::Receive { state_mutability: StateMutability::Payable }),
    }
}

/// Parse a list of human-readable signatures into an ABI. Blank entries are skipped.
pub fn parse_abi<S: AsRef<str>>(signatures: &[S]) -> Result<Abi, AbiError> {
    signatures
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.trim().is_empty())
        .map(parse_abi_item)
        .collect()
}

/// Reduce any accepted signature form to `name(type1,type2,...)`.
pub fn normalize_signature(signature: &str) -> Result<String, AbiError> {
    format_abi_item(&parse_abi_item(signature)?)
}

/// Render `name(type1,...)` for functions, events and errors.
pub fn format_abi_item(item: &AbiItem) -> Result<String, AbiError> {
    match item {
        AbiItem::Function(AbiFunction { name, inputs, .. })
        | AbiItem::Event(AbiEvent { name, inputs, .. })
        | AbiItem::Error(AbiCustomError { name, inputs }) => {
            Ok(format!("{name}({})", format_abi_params(inputs)?))
        }
        other => Err(AbiError::InvalidDefinitionType(other.kind())),
    }
}

/// Comma separated canonical types of `params`.
pub fn format_abi_params(params: &[AbiParameter]) -> Result<String, AbiError> {
    let types: Vec<String> = params_from_abi(params)?.iter().map(|p| p.kind.canonical()).collect();
    Ok(types.join(","))
}

fn to_abi_params(params: &[Param]) -> Vec<AbiParameter> {
    params.iter().map(Param::to_abi).collect()
}

fn parse_mutability(modifiers: &str) -> StateMutability {
    let mut mutability = StateMutability::Nonpayable;
    for word in modifiers.split_whitespace() {
        mutability = match word {
            "pure" => StateMutability::Pure,
            "view" => StateMutability::View,
            "payable" => StateMutability::Payable,
            _ => continue,
        };
    }
    mutability
}

fn is_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}
