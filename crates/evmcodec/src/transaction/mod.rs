//! Typed transactions: serialization, parsing, validation and signing.
//!
//! Wire formats:
//! - legacy: `rlp([nonce, gasPrice, gas, to, value, data, v, r, s])`
//! - EIP-2930: `0x01 || rlp([chainId, nonce, gasPrice, gas, to, value, data, accessList, yParity, r, s])`
//! - EIP-1559: `0x02 || rlp([chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas, to, value, data, accessList, yParity, r, s])`
//! - CIP-64: `0x7b || rlp([... EIP-1559 fields ..., feeCurrency, yParity, r, s])`
//! - CIP-42: `0x7c || rlp([chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas, feeCurrency, gatewayFeeRecipient, gatewayFee, to, value, data, accessList, yParity, r, s])`

mod parse;
mod serialize;
mod sign;
mod validate;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{hex::HexError, rlp::RlpError};

pub use parse::{parse_transaction, serialized_transaction_type};
pub use serialize::{serialize_transaction, serialize_transaction_into};
pub use sign::{
    public_key_to_address, recover_signer, sign_hash, sign_transaction, signing_hash,
    transaction_hash,
};
pub use validate::{fee_from_hex, validate_transaction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("chain id {0} is invalid")]
    InvalidChainId(u64),
    #[error("maxPriorityFeePerGas ({max_priority_fee_per_gas}) cannot be higher than maxFeePerGas ({max_fee_per_gas})")]
    TipAboveFeeCap { max_priority_fee_per_gas: U256, max_fee_per_gas: U256 },
    #[error("fee cap {0} cannot be higher than 2^256-1")]
    FeeCapTooHigh(String),
    #[error("gatewayFee and gatewayFeeRecipient must be provided together")]
    GatewayFeeIncomplete,
    #[error("fee currency {0:?} is not a valid address")]
    InvalidFeeCurrency(String),
    #[error("serialized transaction type {0:#04x} is not supported")]
    InvalidSerializedType(u8),
    #[error("serialized transaction is empty")]
    EmptyTransaction,
    #[error("invalid serialized {tx_type} transaction: expected {expected} fields, given {given}")]
    InvalidSerializedTransaction { tx_type: &'static str, expected: String, given: usize },
    #[error("expected rlp list for {0}")]
    ExpectedList(&'static str),
    #[error("unexpected rlp list for {0}")]
    UnexpectedList(&'static str),
    #[error("non-canonical integer encoding for {0}")]
    NonCanonicalInteger(&'static str),
    #[error("{field} does not fit into {size} bytes")]
    IntegerOverflow { field: &'static str, size: usize },
    #[error("{field} must be 20 bytes or empty, given {len}")]
    InvalidAddress { field: &'static str, len: usize },
    #[error("storage key must be 32 bytes, given {0}")]
    InvalidStorageKey(usize),
    #[error("invalid legacy v value {0}")]
    InvalidLegacyV(U256),
    #[error("yParity must be empty or 0x01")]
    InvalidYParity,
    #[error("transaction is not signed")]
    MissingSignature,
    #[error("signature error: {0}")]
    Signature(String),
    #[error(transparent)]
    Rlp(#[from] RlpError),
    #[error(transparent)]
    Hex(#[from] HexError),
}

/// EIP-2718 transaction type, plus the Celo extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    /// Legacy transaction (pre-EIP-2718)
    Legacy = 0x00,
    /// EIP-2930: Access list transaction
    Eip2930 = 0x01,
    /// EIP-1559: Dynamic fee transaction
    Eip1559 = 0x02,
    /// CIP-64: fee currency adapter transaction
    Cip64 = 0x7b,
    /// CIP-42: fee currency and gateway fee transaction
    Cip42 = 0x7c,
}

impl TxType {
    /// Classify the first byte of a serialized transaction.
    /// Legacy transactions start with an RLP list prefix (>= 0xc0).
    pub const fn from_first_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Eip2930),
            0x02 => Some(Self::Eip1559),
            0x7b => Some(Self::Cip64),
            0x7c => Some(Self::Cip42),
            0xc0..=0xff => Some(Self::Legacy),
            _ => None,
        }
    }

    /// Lowercase name as used in formatted output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Eip2930 => "eip2930",
            Self::Eip1559 => "eip1559",
            Self::Cip64 => "cip64",
            Self::Cip42 => "cip42",
        }
    }

    /// Hex quantity used for the `type` field of RPC objects.
    pub const fn rpc_type(self) -> &'static str {
        match self {
            Self::Legacy => "0x0",
            Self::Eip2930 => "0x1",
            Self::Eip1559 => "0x2",
            Self::Cip64 => "0x7b",
            Self::Cip42 => "0x7c",
        }
    }

    /// Parse the lowercase name produced by [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "legacy" => Some(Self::Legacy),
            "eip2930" => Some(Self::Eip2930),
            "eip1559" => Some(Self::Eip1559),
            "cip64" => Some(Self::Cip64),
            "cip42" => Some(Self::Cip42),
            _ => None,
        }
    }

    /// Number of RLP fields before the signature.
    pub(crate) const fn unsigned_field_count(self) -> usize {
        match self {
            Self::Legacy => 6,
            Self::Eip2930 => 8,
            Self::Eip1559 => 9,
            Self::Cip64 => 10,
            Self::Cip42 => 12,
        }
    }
}

/// ECDSA signature in `(r, s, yParity)` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub r: U256,
    pub s: U256,
    pub y_parity: bool,
}

impl Signature {
    pub const fn new(r: U256, s: U256, y_parity: bool) -> Self {
        Self { r, s, y_parity }
    }

    /// Legacy `v`: `chainId * 2 + 35 + yParity` (EIP-155) or `27 + yParity`.
    pub fn legacy_v(&self, chain_id: Option<u64>) -> U256 {
        let parity = U256::from(self.y_parity as u8);
        match chain_id {
            Some(chain_id) => U256::from(chain_id) * U256::from(2u8) + U256::from(35u8) + parity,
            None => U256::from(27u8) + parity,
        }
    }

    /// Split a legacy `v` into a signature and the chain id it encodes.
    pub fn from_legacy_v(
        v: U256,
        r: U256,
        s: U256,
    ) -> Result<(Self, Option<u64>), TransactionError> {
        if v == U256::from(27u8) || v == U256::from(28u8) {
            return Ok((Self::new(r, s, v == U256::from(28u8)), None));
        }
        if v < U256::from(35u8) {
            return Err(TransactionError::InvalidLegacyV(v));
        }
        let offset = v - U256::from(35u8);
        let y_parity = offset.bit(0);
        let chain_id = u64::try_from(offset >> 1).map_err(|_| TransactionError::InvalidLegacyV(v))?;
        Ok((Self::new(r, s, y_parity), Some(chain_id)))
    }
}

/// One entry of an EIP-2930 access list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<B256>,
}

pub type AccessList = Vec<AccessListItem>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxLegacy {
    /// `None` for pre-EIP-155 transactions.
    pub chain_id: Option<u64>,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub signature: Option<Signature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEip2930 {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub access_list: AccessList,
    pub signature: Option<Signature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEip1559 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub access_list: AccessList,
    pub signature: Option<Signature>,
}

/// Celo CIP-42 transaction. `gateway_fee` of zero means no gateway fee.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxCip42 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas: U256,
    pub fee_currency: Option<Address>,
    pub gateway_fee_recipient: Option<Address>,
    pub gateway_fee: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub access_list: AccessList,
    pub signature: Option<Signature>,
}

/// Celo CIP-64 transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxCip64 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub access_list: AccessList,
    pub fee_currency: Option<Address>,
    pub signature: Option<Signature>,
}

/// A transaction of any supported type, signed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSerializable {
    Legacy(TxLegacy),
    Eip2930(TxEip2930),
    Eip1559(TxEip1559),
    Cip42(TxCip42),
    Cip64(TxCip64),
}

impl TransactionSerializable {
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::Eip2930(_) => TxType::Eip2930,
            Self::Eip1559(_) => TxType::Eip1559,
            Self::Cip42(_) => TxType::Cip42,
            Self::Cip64(_) => TxType::Cip64,
        }
    }

    pub const fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::Eip2930(tx) => Some(tx.chain_id),
            Self::Eip1559(tx) => Some(tx.chain_id),
            Self::Cip42(tx) => Some(tx.chain_id),
            Self::Cip64(tx) => Some(tx.chain_id),
        }
    }

    pub const fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Legacy(tx) => tx.signature.as_ref(),
            Self::Eip2930(tx) => tx.signature.as_ref(),
            Self::Eip1559(tx) => tx.signature.as_ref(),
            Self::Cip42(tx) => tx.signature.as_ref(),
            Self::Cip64(tx) => tx.signature.as_ref(),
        }
    }

    /// Replace (or clear) the embedded signature.
    pub fn set_signature(&mut self, signature: Option<Signature>) {
        let slot = match self {
            Self::Legacy(tx) => &mut tx.signature,
            Self::Eip2930(tx) => &mut tx.signature,
            Self::Eip1559(tx) => &mut tx.signature,
            Self::Cip42(tx) => &mut tx.signature,
            Self::Cip64(tx) => &mut tx.signature,
        };
        *slot = signature;
    }

    /// Builder-style [`set_signature`](Self::set_signature).
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.set_signature(Some(signature));
        self
    }
}

impl From<TxLegacy> for TransactionSerializable {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip2930> for TransactionSerializable {
    fn from(tx: TxEip2930) -> Self {
        Self::Eip2930(tx)
    }
}

impl From<TxEip1559> for TransactionSerializable {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

impl From<TxCip42> for TransactionSerializable {
    fn from(tx: TxCip42) -> Self {
        Self::Cip42(tx)
    }
}

impl From<TxCip64> for TransactionSerializable {
    fn from(tx: TxCip64) -> Self {
        Self::Cip64(tx)
    }
}
