use alloy_primitives::{Address, Bytes};

use super::{
    validate_transaction, AccessList, Signature, TransactionError, TransactionSerializable,
    TxCip42, TxCip64, TxEip1559, TxEip2930, TxLegacy,
};
use crate::rlp::{encode_rlp_into, RlpItem};

/// Serialize `tx` to its wire form.
///
/// `signature` takes precedence over the one embedded in `tx`; with neither, the unsigned
/// form is produced.
pub fn serialize_transaction(
    tx: &TransactionSerializable,
    signature: Option<&Signature>,
) -> Result<Bytes, TransactionError> {
    let mut out = Vec::with_capacity(256);
    serialize_transaction_into(tx, signature, &mut out)?;
    Ok(Bytes::from(out))
}

/// Serialize `tx` into the provided buffer.
pub fn serialize_transaction_into(
    tx: &TransactionSerializable,
    signature: Option<&Signature>,
    out: &mut Vec<u8>,
) -> Result<(), TransactionError> {
    validate_transaction(tx)?;
    encode_with(tx, signature.or(tx.signature()), out);
    Ok(())
}

/// Encode without looking at the embedded signature. `None` yields the signing payload.
pub(super) fn encode_with(
    tx: &TransactionSerializable,
    signature: Option<&Signature>,
    out: &mut Vec<u8>,
) {
    let mut fields = match tx {
        TransactionSerializable::Legacy(tx) => return encode_legacy(tx, signature, out),
        TransactionSerializable::Eip2930(tx) => eip2930_fields(tx),
        TransactionSerializable::Eip1559(tx) => eip1559_fields(tx),
        TransactionSerializable::Cip42(tx) => cip42_fields(tx),
        TransactionSerializable::Cip64(tx) => cip64_fields(tx),
    };

    out.push(tx.tx_type() as u8);
    if let Some(signature) = signature {
        let y_parity = if signature.y_parity { RlpItem::bytes([1u8]) } else { RlpItem::EMPTY };
        fields.extend([y_parity, RlpItem::uint(signature.r), RlpItem::uint(signature.s)]);
    }
    encode_rlp_into(&RlpItem::List(fields), out);
}

fn encode_legacy(tx: &TxLegacy, signature: Option<&Signature>, out: &mut Vec<u8>) {
    let mut fields = vec![
        RlpItem::u64(tx.nonce),
        RlpItem::uint(tx.gas_price),
        RlpItem::uint(tx.gas),
        address_item(tx.to),
        RlpItem::uint(tx.value),
        RlpItem::Bytes(tx.data.clone()),
    ];

    match (signature, tx.chain_id) {
        (Some(signature), chain_id) => fields.extend([
            RlpItem::uint(signature.legacy_v(chain_id)),
            RlpItem::uint(signature.r),
            RlpItem::uint(signature.s),
        ]),
        // EIP-155 signing payload
        (None, Some(chain_id)) => {
            fields.extend([RlpItem::u64(chain_id), RlpItem::EMPTY, RlpItem::EMPTY])
        }
        (None, None) => {}
    }
    encode_rlp_into(&RlpItem::List(fields), out);
}

fn eip2930_fields(tx: &TxEip2930) -> Vec<RlpItem> {
    vec![
        RlpItem::u64(tx.chain_id),
        RlpItem::u64(tx.nonce),
        RlpItem::uint(tx.gas_price),
        RlpItem::uint(tx.gas),
        address_item(tx.to),
        RlpItem::uint(tx.value),
        RlpItem::Bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
    ]
}

fn eip1559_fields(tx: &TxEip1559) -> Vec<RlpItem> {
    vec![
        RlpItem::u64(tx.chain_id),
        RlpItem::u64(tx.nonce),
        RlpItem::uint(tx.max_priority_fee_per_gas),
        RlpItem::uint(tx.max_fee_per_gas),
        RlpItem::uint(tx.gas),
        address_item(tx.to),
        RlpItem::uint(tx.value),
        RlpItem::Bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
    ]
}

fn cip42_fields(tx: &TxCip42) -> Vec<RlpItem> {
    vec![
        RlpItem::u64(tx.chain_id),
        RlpItem::u64(tx.nonce),
        RlpItem::uint(tx.max_priority_fee_per_gas),
        RlpItem::uint(tx.max_fee_per_gas),
        RlpItem::uint(tx.gas),
        address_item(tx.fee_currency),
        address_item(tx.gateway_fee_recipient),
        RlpItem::uint(tx.gateway_fee),
        address_item(tx.to),
        RlpItem::uint(tx.value),
        RlpItem::Bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
    ]
}

fn cip64_fields(tx: &TxCip64) -> Vec<RlpItem> {
    vec![
        RlpItem::u64(tx.chain_id),
        RlpItem::u64(tx.nonce),
        RlpItem::uint(tx.max_priority_fee_per_gas),
        RlpItem::uint(tx.max_fee_per_gas),
        RlpItem::uint(tx.gas),
        address_item(tx.to),
        RlpItem::uint(tx.value),
        RlpItem::Bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
        address_item(tx.fee_currency),
    ]
}

/// 20 raw bytes, or the empty string for contract creation / absent addresses.
fn address_item(address: Option<Address>) -> RlpItem {
    match address {
        Some(address) => RlpItem::bytes(address),
        None => RlpItem::EMPTY,
    }
}

fn access_list_item(access_list: &AccessList) -> RlpItem {
    RlpItem::List(
        access_list
            .iter()
            .map(|entry| {
                RlpItem::List(vec![
                    RlpItem::bytes(entry.address),
                    RlpItem::List(entry.storage_keys.iter().map(RlpItem::bytes).collect()),
                ])
            })
            .collect(),
    )
}
