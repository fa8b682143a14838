//! Error type for the formatter crate.

use thiserror::Error;

use evmcodec::{AbiError, HexError, RlpError, TransactionError};

/// Errors raised while formatting RPC objects or mapping JSON to domain values.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A field value has the wrong JSON shape or content.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A field required to build the target value is absent.
    #[error("missing field {0}")]
    MissingField(&'static str),

    /// The input is not a JSON object.
    #[error("expected a JSON object for {0}")]
    ExpectedObject(&'static str),

    /// The request carries no `type` and its fields match no known type.
    #[error("cannot infer transaction type from request fields")]
    CannotInferType,

    /// The transaction type is unknown or not enabled on this chain.
    #[error("transaction type {tx_type} is not supported on {chain}")]
    UnsupportedTransactionType { tx_type: String, chain: &'static str },

    /// A JSON value does not fit the ABI type it is mapped to.
    #[error("cannot map JSON value to {ty}: {reason}")]
    InvalidAbiJson { ty: String, reason: String },

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Hex(#[from] HexError),

    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl FormatError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField { field: field.to_string(), reason: reason.into() }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
