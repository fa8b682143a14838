use alloy_primitives::{hex, Address, Bytes, B256, U256};

use super::{
    validate_transaction, AccessList, AccessListItem, Signature, TransactionError,
    TransactionSerializable, TxCip42, TxCip64, TxEip1559, TxEip2930, TxLegacy, TxType,
};
use crate::rlp::{from_rlp, RlpItem};

/// Type of a serialized transaction, from its first byte.
pub fn serialized_transaction_type(data: &[u8]) -> Result<TxType, TransactionError> {
    let first = *data.first().ok_or(TransactionError::EmptyTransaction)?;
    TxType::from_first_byte(first).ok_or(TransactionError::InvalidSerializedType(first))
}

/// Parse a serialized transaction of any supported type.
pub fn parse_transaction(data: &[u8]) -> Result<TransactionSerializable, TransactionError> {
    let tx_type = serialized_transaction_type(data)?;
    let payload = if tx_type == TxType::Legacy { data } else { &data[1..] };

    let RlpItem::List(fields) = from_rlp(payload)? else {
        return Err(TransactionError::ExpectedList("transaction"));
    };

    let unsigned = tx_type.unsigned_field_count();
    if fields.len() != unsigned && fields.len() != unsigned + 3 {
        return Err(TransactionError::InvalidSerializedTransaction {
            tx_type: tx_type.as_str(),
            expected: format!("{unsigned} or {}", unsigned + 3),
            given: fields.len(),
        });
    }
    tracing::trace!(tx_type = tx_type.as_str(), fields = fields.len(), "parsing transaction");

    let mut reader = FieldReader::new(&fields);
    let tx = match tx_type {
        TxType::Legacy => parse_legacy(&mut reader)?,
        TxType::Eip2930 => TransactionSerializable::Eip2930(TxEip2930 {
            chain_id: reader.u64("chainId")?,
            nonce: reader.u64("nonce")?,
            gas_price: reader.u256("gasPrice")?,
            gas: reader.u256("gas")?,
            to: reader.address("to")?,
            value: reader.u256("value")?,
            data: reader.data("data")?,
            access_list: reader.access_list()?,
            signature: reader.typed_signature()?,
        }),
        TxType::Eip1559 => TransactionSerializable::Eip1559(TxEip1559 {
            chain_id: reader.u64("chainId")?,
            nonce: reader.u64("nonce")?,
            max_priority_fee_per_gas: reader.u256("maxPriorityFeePerGas")?,
            max_fee_per_gas: reader.u256("maxFeePerGas")?,
            gas: reader.u256("gas")?,
            to: reader.address("to")?,
            value: reader.u256("value")?,
            data: reader.data("data")?,
            access_list: reader.access_list()?,
            signature: reader.typed_signature()?,
        }),
        TxType::Cip42 => TransactionSerializable::Cip42(TxCip42 {
            chain_id: reader.u64("chainId")?,
            nonce: reader.u64("nonce")?,
            max_priority_fee_per_gas: reader.u256("maxPriorityFeePerGas")?,
            max_fee_per_gas: reader.u256("maxFeePerGas")?,
            gas: reader.u256("gas")?,
            fee_currency: reader.fee_currency()?,
            gateway_fee_recipient: reader.address("gatewayFeeRecipient")?,
            gateway_fee: reader.u256("gatewayFee")?,
            to: reader.address("to")?,
            value: reader.u256("value")?,
            data: reader.data("data")?,
            access_list: reader.access_list()?,
            signature: reader.typed_signature()?,
        }),
        TxType::Cip64 => TransactionSerializable::Cip64(TxCip64 {
            chain_id: reader.u64("chainId")?,
            nonce: reader.u64("nonce")?,
            max_priority_fee_per_gas: reader.u256("maxPriorityFeePerGas")?,
            max_fee_per_gas: reader.u256("maxFeePerGas")?,
            gas: reader.u256("gas")?,
            to: reader.address("to")?,
            value: reader.u256("value")?,
            data: reader.data("data")?,
            access_list: reader.access_list()?,
            fee_currency: reader.fee_currency()?,
            signature: reader.typed_signature()?,
        }),
    };

    validate_transaction(&tx)?;
    Ok(tx)
}

fn parse_legacy(reader: &mut FieldReader<'_>) -> Result<TransactionSerializable, TransactionError> {
    let mut tx = TxLegacy {
        chain_id: None,
        nonce: reader.u64("nonce")?,
        gas_price: reader.u256("gasPrice")?,
        gas: reader.u256("gas")?,
        to: reader.address("to")?,
        value: reader.u256("value")?,
        data: reader.data("data")?,
        signature: None,
    };

    if reader.remaining() == 3 {
        let v = reader.u256("v")?;
        let r = reader.u256("r")?;
        let s = reader.u256("s")?;

        if r.is_zero() && s.is_zero() {
            // Unsigned EIP-155 payload: `v` carries the chain id.
            let chain_id = u64::try_from(v).map_err(|_| TransactionError::InvalidLegacyV(v))?;
            tx.chain_id = (chain_id > 0).then_some(chain_id);
        } else {
            let (signature, chain_id) = Signature::from_legacy_v(v, r, s)?;
            tx.chain_id = chain_id;
            tx.signature = Some(signature);
        }
    }
    Ok(TransactionSerializable::Legacy(tx))
}

/// Sequential reader over the top-level fields of a transaction.
struct FieldReader<'a> {
    fields: &'a [RlpItem],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    const fn new(fields: &'a [RlpItem]) -> Self {
        Self { fields, pos: 0 }
    }

    const fn remaining(&self) -> usize {
        self.fields.len() - self.pos
    }

    fn next(&mut self, field: &'static str) -> Result<&'a RlpItem, TransactionError> {
        let item =
            self.fields.get(self.pos).ok_or_else(|| TransactionError::InvalidSerializedTransaction {
                tx_type: "transaction",
                expected: format!("field {field}"),
                given: self.fields.len(),
            })?;
        self.pos += 1;
        Ok(item)
    }

    fn bytes(&mut self, field: &'static str) -> Result<&'a Bytes, TransactionError> {
        self.next(field)?.as_bytes().ok_or(TransactionError::UnexpectedList(field))
    }

    fn u256(&mut self, field: &'static str) -> Result<U256, TransactionError> {
        let raw = self.bytes(field)?;
        Ok(U256::from_be_slice(canonical_integer(raw, 32, field)?))
    }

    fn u64(&mut self, field: &'static str) -> Result<u64, TransactionError> {
        let raw = canonical_integer(self.bytes(field)?, 8, field)?;
        let mut word = [0u8; 8];
        word[8 - raw.len()..].copy_from_slice(raw);
        Ok(u64::from_be_bytes(word))
    }

    fn data(&mut self, field: &'static str) -> Result<Bytes, TransactionError> {
        self.bytes(field).cloned()
    }

    fn address(&mut self, field: &'static str) -> Result<Option<Address>, TransactionError> {
        let raw = self.bytes(field)?;
        match raw.len() {
            0 => Ok(None),
            20 => Ok(Some(Address::from_slice(raw))),
            len => Err(TransactionError::InvalidAddress { field, len }),
        }
    }

    fn fee_currency(&mut self) -> Result<Option<Address>, TransactionError> {
        let raw = self.bytes("feeCurrency")?;
        match raw.len() {
            0 => Ok(None),
            20 => Ok(Some(Address::from_slice(raw))),
            _ => Err(TransactionError::InvalidFeeCurrency(hex::encode_prefixed(raw))),
        }
    }

    fn access_list(&mut self) -> Result<AccessList, TransactionError> {
        let entries = self
            .next("accessList")?
            .as_list()
            .ok_or(TransactionError::ExpectedList("accessList"))?;
        entries.iter().map(access_list_entry).collect()
    }

    /// `[yParity, r, s]` when present.
    fn typed_signature(&mut self) -> Result<Option<Signature>, TransactionError> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let y_parity = match self.bytes("yParity")?.as_ref() {
            [] => false,
            [1] => true,
            _ => return Err(TransactionError::InvalidYParity),
        };
        let r = self.u256("r")?;
        let s = self.u256("s")?;
        Ok(Some(Signature::new(r, s, y_parity)))
    }
}

fn access_list_entry(entry: &RlpItem) -> Result<AccessListItem, TransactionError> {
    let Some([address, keys]) = entry.as_list() else {
        return Err(TransactionError::ExpectedList("accessList entry"));
    };

    let address =
        address.as_bytes().ok_or(TransactionError::UnexpectedList("accessList address"))?;
    if address.len() != 20 {
        return Err(TransactionError::InvalidAddress {
            field: "accessList address",
            len: address.len(),
        });
    }

    let storage_keys = keys
        .as_list()
        .ok_or(TransactionError::ExpectedList("storageKeys"))?
        .iter()
        .map(|key| {
            let key = key.as_bytes().ok_or(TransactionError::UnexpectedList("storageKey"))?;
            if key.len() != 32 {
                return Err(TransactionError::InvalidStorageKey(key.len()));
            }
            Ok(B256::from_slice(key))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccessListItem { address: Address::from_slice(address), storage_keys })
}

/// Big-endian integer without leading zeros, at most `size` bytes.
fn canonical_integer<'b>(
    raw: &'b [u8],
    size: usize,
    field: &'static str,
) -> Result<&'b [u8], TransactionError> {
    if raw.first() == Some(&0) {
        return Err(TransactionError::NonCanonicalInteger(field));
    }
    if raw.len() > size {
        return Err(TransactionError::IntegerOverflow { field, size });
    }
    Ok(raw)
}
