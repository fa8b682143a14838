//! Conversion between RPC transaction requests and [`TransactionSerializable`].

use alloy_primitives::{hex, Address, Bytes, U256};
use evmcodec::{
    checksum_address, from_hex,
    transaction::validate_transaction,
    AccessList, Signature, TransactionSerializable, TxCip42, TxCip64, TxEip1559, TxEip2930,
    TxLegacy, TxType,
};
use serde_json::{Map, Value};

use crate::{ChainFormatters, Entity, Field, FormatError, Formatted};

/// Build a transaction from an RPC request object.
///
/// An explicit `type` wins. Without one the type is inferred from the fields present, in
/// this order: gateway fee fields (`cip42`), `feeCurrency` with EIP-1559 fees (`cip64`),
/// EIP-1559 fees (`eip1559`), `gasPrice` with an access list (`eip2930`), `gasPrice`
/// (`legacy`). The chosen type must be enabled on `chain`.
pub fn transaction_from_request(
    raw: &Value,
    chain: &ChainFormatters,
) -> Result<TransactionSerializable, FormatError> {
    let object = raw.as_object().ok_or(FormatError::ExpectedObject("transactionRequest"))?;
    let fields = Request { raw: object, formatted: chain.format(Entity::TransactionRequest, raw)? };

    let tx_type = match fields.formatted.get("type") {
        Some(Field::Tag(tag)) => TxType::from_name(tag).ok_or(FormatError::CannotInferType)?,
        Some(Field::Raw(Value::Null)) | None => infer_type(&fields)?,
        Some(other) => {
            return Err(FormatError::UnsupportedTransactionType {
                tx_type: other.to_json().to_string(),
                chain: chain.name,
            })
        }
    };
    if !chain.supports(tx_type) {
        return Err(FormatError::UnsupportedTransactionType {
            tx_type: tx_type.as_str().to_string(),
            chain: chain.name,
        });
    }
    tracing::debug!(tx_type = tx_type.as_str(), chain = chain.name, "building transaction from request");

    let tx = match tx_type {
        TxType::Legacy => {
            let (signature, implied_chain_id) = fields.legacy_signature()?;
            TransactionSerializable::Legacy(TxLegacy {
                chain_id: fields.optional_number("chainId")?.or(implied_chain_id),
                nonce: fields.number("nonce")?,
                gas_price: fields.quantity("gasPrice")?,
                gas: fields.quantity("gas")?,
                to: fields.address("to")?,
                value: fields.quantity("value")?,
                data: fields.data()?,
                signature,
            })
        }
        TxType::Eip2930 => TransactionSerializable::Eip2930(TxEip2930 {
            chain_id: fields.chain_id()?,
            nonce: fields.number("nonce")?,
            gas_price: fields.quantity("gasPrice")?,
            gas: fields.quantity("gas")?,
            to: fields.address("to")?,
            value: fields.quantity("value")?,
            data: fields.data()?,
            access_list: fields.access_list()?,
            signature: fields.typed_signature()?,
        }),
        TxType::Eip1559 => TransactionSerializable::Eip1559(TxEip1559 {
            chain_id: fields.chain_id()?,
            nonce: fields.number("nonce")?,
            max_priority_fee_per_gas: fields.quantity("maxPriorityFeePerGas")?,
            max_fee_per_gas: fields.quantity("maxFeePerGas")?,
            gas: fields.quantity("gas")?,
            to: fields.address("to")?,
            value: fields.quantity("value")?,
            data: fields.data()?,
            access_list: fields.access_list()?,
            signature: fields.typed_signature()?,
        }),
        TxType::Cip42 => TransactionSerializable::Cip42(TxCip42 {
            chain_id: fields.chain_id()?,
            nonce: fields.number("nonce")?,
            max_priority_fee_per_gas: fields.quantity("maxPriorityFeePerGas")?,
            max_fee_per_gas: fields.quantity("maxFeePerGas")?,
            gas: fields.quantity("gas")?,
            fee_currency: fields.address("feeCurrency")?,
            gateway_fee_recipient: fields.address("gatewayFeeRecipient")?,
            gateway_fee: fields.quantity("gatewayFee")?,
            to: fields.address("to")?,
            value: fields.quantity("value")?,
            data: fields.data()?,
            access_list: fields.access_list()?,
            signature: fields.typed_signature()?,
        }),
        TxType::Cip64 => TransactionSerializable::Cip64(TxCip64 {
            chain_id: fields.chain_id()?,
            nonce: fields.number("nonce")?,
            max_priority_fee_per_gas: fields.quantity("maxPriorityFeePerGas")?,
            max_fee_per_gas: fields.quantity("maxFeePerGas")?,
            gas: fields.quantity("gas")?,
            to: fields.address("to")?,
            value: fields.quantity("value")?,
            data: fields.data()?,
            access_list: fields.access_list()?,
            fee_currency: fields.address("feeCurrency")?,
            signature: fields.typed_signature()?,
        }),
    };

    validate_transaction(&tx)?;
    Ok(tx)
}

fn infer_type(fields: &Request<'_>) -> Result<TxType, FormatError> {
    let eip1559_fees = fields.has("maxFeePerGas") || fields.has("maxPriorityFeePerGas");

    if fields.has("gatewayFee") || fields.has("gatewayFeeRecipient") {
        Ok(TxType::Cip42)
    } else if fields.has("feeCurrency") && eip1559_fees {
        Ok(TxType::Cip64)
    } else if eip1559_fees {
        Ok(TxType::Eip1559)
    } else if fields.has("gasPrice") && fields.has("accessList") {
        Ok(TxType::Eip2930)
    } else if fields.has("gasPrice") {
        Ok(TxType::Legacy)
    } else {
        Err(FormatError::CannotInferType)
    }
}

/// A request object alongside its formatted view.
struct Request<'a> {
    raw: &'a Map<String, Value>,
    formatted: Formatted,
}

impl Request<'_> {
    fn has(&self, name: &str) -> bool {
        self.formatted.get(name).is_some_and(|field| !field.is_null())
    }

    fn present(&self, name: &str) -> Option<&Field> {
        self.formatted.get(name).filter(|field| !field.is_null())
    }

    fn quantity(&self, name: &str) -> Result<U256, FormatError> {
        match self.present(name) {
            None => Ok(U256::ZERO),
            Some(field) => field
                .as_quantity()
                .ok_or_else(|| FormatError::invalid(name, "expected a hex quantity")),
        }
    }

    fn optional_number(&self, name: &str) -> Result<Option<u64>, FormatError> {
        self.present(name)
            .map(|field| {
                field.as_number().ok_or_else(|| FormatError::invalid(name, "expected a hex number"))
            })
            .transpose()
    }

    fn number(&self, name: &str) -> Result<u64, FormatError> {
        Ok(self.optional_number(name)?.unwrap_or_default())
    }

    fn chain_id(&self) -> Result<u64, FormatError> {
        self.optional_number("chainId")?.ok_or(FormatError::MissingField("chainId"))
    }

    fn address(&self, name: &str) -> Result<Option<Address>, FormatError> {
        self.present(name)
            .map(|field| field.as_address().ok_or_else(|| FormatError::invalid(name, "expected an address")))
            .transpose()
    }

    /// `data` wins over `input` when both are set.
    fn data(&self) -> Result<Bytes, FormatError> {
        match self.present("data").or_else(|| self.present("input")) {
            None => Ok(Bytes::new()),
            Some(Field::Data(data)) => Ok(data.clone()),
            Some(_) => Err(FormatError::invalid("data", "expected hex data")),
        }
    }

    fn access_list(&self) -> Result<AccessList, FormatError> {
        match self.raw.get("accessList") {
            None | Some(Value::Null) => Ok(AccessList::new()),
            Some(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }

    fn raw_quantity(&self, name: &str) -> Result<Option<U256>, FormatError> {
        match self.raw.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(from_hex(text, None)?)),
            Some(_) => Err(FormatError::invalid(name, "expected a hex quantity")),
        }
    }

    fn r_s(&self) -> Result<Option<(U256, U256)>, FormatError> {
        Ok(self.raw_quantity("r")?.zip(self.raw_quantity("s")?))
    }

    fn legacy_signature(&self) -> Result<(Option<Signature>, Option<u64>), FormatError> {
        let Some((r, s)) = self.r_s()? else {
            return Ok((None, None));
        };
        let v = self.raw_quantity("v")?.ok_or(FormatError::MissingField("v"))?;
        let (signature, chain_id) = Signature::from_legacy_v(v, r, s)?;
        Ok((Some(signature), chain_id))
    }

    /// `yParity`, or a `v` of 0/1/27/28.
    fn typed_signature(&self) -> Result<Option<Signature>, FormatError> {
        let Some((r, s)) = self.r_s()? else {
            return Ok(None);
        };
        let parity = match self.raw_quantity("yParity")? {
            Some(parity) => parity,
            None => self.raw_quantity("v")?.ok_or(FormatError::MissingField("yParity"))?,
        };
        let y_parity = match u8::try_from(parity) {
            Ok(0 | 27) => false,
            Ok(1 | 28) => true,
            _ => return Err(FormatError::invalid("yParity", "expected 0x0 or 0x1")),
        };
        Ok(Some(Signature::new(r, s, y_parity)))
    }
}

fn quantity_hex(value: U256) -> Value {
    Value::String(format!("0x{value:x}"))
}

/// RPC request object for `tx`: hex quantities, checksummed addresses and a `type` field.
pub fn request_from_transaction(tx: &TransactionSerializable) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), Value::from(tx.tx_type().rpc_type()));
    if let Some(chain_id) = tx.chain_id() {
        out.insert("chainId".to_string(), quantity_hex(U256::from(chain_id)));
    }

    let mut put = |name: &str, value: U256| {
        out.insert(name.to_string(), quantity_hex(value));
    };
    let (nonce, to, data, access_list) = match tx {
        TransactionSerializable::Legacy(tx) => {
            put("gasPrice", tx.gas_price);
            put("gas", tx.gas);
            put("value", tx.value);
            (tx.nonce, tx.to, &tx.data, None)
        }
        TransactionSerializable::Eip2930(tx) => {
            put("gasPrice", tx.gas_price);
            put("gas", tx.gas);
            put("value", tx.value);
            (tx.nonce, tx.to, &tx.data, Some(&tx.access_list))
        }
        TransactionSerializable::Eip1559(tx) => {
            put("maxPriorityFeePerGas", tx.max_priority_fee_per_gas);
            put("maxFeePerGas", tx.max_fee_per_gas);
            put("gas", tx.gas);
            put("value", tx.value);
            (tx.nonce, tx.to, &tx.data, Some(&tx.access_list))
        }
        TransactionSerializable::Cip42(tx) => {
            put("maxPriorityFeePerGas", tx.max_priority_fee_per_gas);
            put("maxFeePerGas", tx.max_fee_per_gas);
            put("gas", tx.gas);
            put("value", tx.value);
            put("gatewayFee", tx.gateway_fee);
            (tx.nonce, tx.to, &tx.data, Some(&tx.access_list))
        }
        TransactionSerializable::Cip64(tx) => {
            put("maxPriorityFeePerGas", tx.max_priority_fee_per_gas);
            put("maxFeePerGas", tx.max_fee_per_gas);
            put("gas", tx.gas);
            put("value", tx.value);
            (tx.nonce, tx.to, &tx.data, Some(&tx.access_list))
        }
    };

    out.insert("nonce".to_string(), quantity_hex(U256::from(nonce)));
    if let Some(to) = to {
        out.insert("to".to_string(), Value::String(checksum_address(&to)));
    }
    out.insert("data".to_string(), Value::String(hex::encode_prefixed(data)));
    if let Some(access_list) = access_list {
        out.insert("accessList".to_string(), access_list_json(access_list));
    }

    let fee_addresses = match tx {
        TransactionSerializable::Cip42(tx) => {
            vec![("feeCurrency", tx.fee_currency), ("gatewayFeeRecipient", tx.gateway_fee_recipient)]
        }
        TransactionSerializable::Cip64(tx) => vec![("feeCurrency", tx.fee_currency)],
        _ => Vec::new(),
    };
    for (name, address) in fee_addresses {
        if let Some(address) = address {
            out.insert(name.to_string(), Value::String(checksum_address(&address)));
        }
    }

    if let Some(signature) = tx.signature() {
        out.insert("r".to_string(), quantity_hex(signature.r));
        out.insert("s".to_string(), quantity_hex(signature.s));
        out.insert("yParity".to_string(), quantity_hex(U256::from(signature.y_parity as u8)));
        if tx.tx_type() == TxType::Legacy {
            out.insert("v".to_string(), quantity_hex(signature.legacy_v(tx.chain_id())));
        }
    }
    Value::Object(out)
}

fn access_list_json(access_list: &AccessList) -> Value {
    Value::Array(
        access_list
            .iter()
            .map(|item| {
                let keys = item.storage_keys.iter().map(|key| Value::String(hex::encode_prefixed(key)));
                let mut entry = Map::new();
                entry.insert("address".to_string(), Value::String(checksum_address(&item.address)));
                entry.insert("storageKeys".to_string(), Value::Array(keys.collect()));
                Value::Object(entry)
            })
            .collect(),
    )
}
