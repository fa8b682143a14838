use alloy_primitives::U256;

use super::{TransactionError, TransactionSerializable};
use crate::{hex::hex_to_bytes, rlp::trim_leading_zeros};

/// Checks run before a transaction is serialized or after it is parsed.
pub fn validate_transaction(tx: &TransactionSerializable) -> Result<(), TransactionError> {
    match tx {
        TransactionSerializable::Legacy(tx) => check_chain_id(tx.chain_id),
        TransactionSerializable::Eip2930(tx) => check_chain_id(Some(tx.chain_id)),
        TransactionSerializable::Eip1559(tx) => {
            check_chain_id(Some(tx.chain_id))?;
            check_fee_cap(tx.max_priority_fee_per_gas, tx.max_fee_per_gas)
        }
        TransactionSerializable::Cip64(tx) => {
            check_chain_id(Some(tx.chain_id))?;
            check_fee_cap(tx.max_priority_fee_per_gas, tx.max_fee_per_gas)
        }
        TransactionSerializable::Cip42(tx) => {
            check_chain_id(Some(tx.chain_id))?;
            check_fee_cap(tx.max_priority_fee_per_gas, tx.max_fee_per_gas)?;
            if tx.gateway_fee.is_zero() != tx.gateway_fee_recipient.is_none() {
                return Err(TransactionError::GatewayFeeIncomplete);
            }
            Ok(())
        }
    }
}

/// Parse a hex fee quantity, rejecting anything above `2^256 - 1`.
pub fn fee_from_hex(value: &str) -> Result<U256, TransactionError> {
    let bytes = hex_to_bytes(value)?;
    let digits = trim_leading_zeros(&bytes);
    if digits.len() > 32 {
        return Err(TransactionError::FeeCapTooHigh(value.to_string()));
    }
    Ok(U256::from_be_slice(digits))
}

#[inline]
fn check_chain_id(chain_id: Option<u64>) -> Result<(), TransactionError> {
    match chain_id {
        Some(0) => Err(TransactionError::InvalidChainId(0)),
        _ => Ok(()),
    }
}

#[inline]
fn check_fee_cap(max_priority_fee_per_gas: U256, max_fee_per_gas: U256) -> Result<(), TransactionError> {
    if max_priority_fee_per_gas > max_fee_per_gas {
        return Err(TransactionError::TipAboveFeeCap { max_priority_fee_per_gas, max_fee_per_gas });
    }
    Ok(())
}
