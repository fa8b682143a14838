//! Contract ABI encoding and decoding.
//!
//! Parameter types are resolved once from their JSON or human-readable form into a
//! [`ParamType`] tree; values travel as [`AbiValue`]. The head/tail layout follows the
//! Solidity ABI specification: <https://docs.soliditylang.org/en/latest/abi-spec.html>

mod decode;
mod encode;
mod error_result;
mod event;
mod function;
mod packed;
mod param;
mod selector;
mod signature;
mod value;

use alloy_primitives::{B256, U256};
use thiserror::Error;

use crate::hex::HexError;

pub use decode::decode_abi_parameters;
pub use encode::encode_abi_parameters;
pub use error_result::{
    decode_error_result, encode_error_result, panic_reason, DecodedError, ERROR_SELECTOR,
    PANIC_SELECTOR,
};
pub use event::{decode_event_log, encode_event_topics, DecodedEvent};
pub use function::{
    decode_function_data, decode_function_result, encode_deploy_data, encode_function_data,
    encode_function_result, find_function, DecodedFunctionCall,
};
pub use packed::encode_packed;
pub use param::{params_from_abi, Param, ParamType};
pub use selector::{event_selector, function_selector, item_selector, item_topic, Selector};
pub use signature::{
    format_abi_item, format_abi_params, normalize_signature, parse_abi, parse_abi_item,
};
pub use value::AbiValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("invalid ABI type: {0:?}")]
    InvalidAbiType(String),
    #[error("invalid signature {signature:?}: {reason}")]
    InvalidSignature { signature: String, reason: &'static str },
    #[error("parameter count mismatch: expected {expected}, given {given}")]
    LengthMismatch { expected: usize, given: usize },
    #[error("array length mismatch for {ty}: expected {expected}, given {given}")]
    ArrayLengthMismatch { ty: String, expected: usize, given: usize },
    #[error("bytes size mismatch: expected {expected}, given {given}")]
    BytesSizeMismatch { expected: usize, given: usize },
    #[error("type mismatch: expected {expected}, given {given}")]
    TypeMismatch { expected: String, given: &'static str },
    #[error("named tuple is missing field {0:?}")]
    NamedTupleFieldMissing(String),
    #[error("cannot decode zero data (\"0x\") with a non-empty parameter list")]
    ZeroData,
    #[error("data size too small: expected at least {expected} bytes, given {given}")]
    DataSizeTooSmall { expected: usize, given: usize },
    #[error("offset {offset} is out of bounds (size: {size})")]
    OffsetOutOfBounds { offset: U256, size: usize },
    #[error("decoding stopped after {limit} values")]
    DecodeLimitExceeded { limit: usize },
    #[error("invalid boolean slot")]
    InvalidBool,
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0} is not a valid definition type for this operation")]
    InvalidDefinitionType(&'static str),
    #[error("function {0:?} not found on ABI")]
    FunctionNotFound(String),
    #[error("no function on ABI matches selector {0}")]
    FunctionSignatureNotFound(String),
    #[error("constructor arguments given but ABI has no constructor")]
    ConstructorNotFound,
    #[error("error {0:?} not found on ABI")]
    ErrorNotFound(String),
    #[error("no error on ABI matches selector {0}")]
    ErrorSignatureNotFound(String),
    #[error("event {0:?} not found on ABI")]
    EventNotFound(String),
    #[error("no event on ABI matches topic {0}")]
    EventSignatureNotFound(B256),
    #[error("cannot decode a log without topics")]
    EventSignatureEmptyTopics,
    #[error("event {event} expects {expected} indexed topics, given {given}")]
    TopicsMismatch { event: String, expected: usize, given: usize },
    #[error("{0} values cannot be used as topic filters")]
    FilterTypeNotSupported(String),
    #[error("{0} is not supported in packed mode")]
    UnsupportedPackedType(String),
    #[error(transparent)]
    Hex(#[from] HexError),
}
