//! Per-chain formatter tables.

use bon::Builder;
use evmcodec::TxType;
use serde_json::Value;

use crate::{
    field::{self, Field},
    format, Entity, FieldTable, FormatError, FormatOptions, Formatted,
};

const FEE_FIELDS: &[&str] =
    &["gasPrice", "maxFeePerGas", "maxPriorityFeePerGas", "maxFeePerBlobGas"];

/// One [`FieldTable`] per entity.
#[derive(Debug, Clone, Default, Builder)]
pub struct EntityTables {
    #[builder(default)]
    pub block: FieldTable,
    #[builder(default)]
    pub transaction: FieldTable,
    #[builder(default)]
    pub transaction_receipt: FieldTable,
    #[builder(default)]
    pub transaction_request: FieldTable,
}

impl EntityTables {
    pub const fn get(&self, entity: Entity) -> &FieldTable {
        match entity {
            Entity::Block => &self.block,
            Entity::Transaction => &self.transaction,
            Entity::TransactionReceipt => &self.transaction_receipt,
            Entity::TransactionRequest => &self.transaction_request,
        }
    }

    /// Wire to domain coercion shared by every EVM chain.
    pub fn ethereum() -> Self {
        let block = FieldTable::new()
            .with_all(
                &[
                    "baseFeePerGas",
                    "blobGasUsed",
                    "difficulty",
                    "excessBlobGas",
                    "gasLimit",
                    "gasUsed",
                    "size",
                    "timestamp",
                    "totalDifficulty",
                ],
                field::quantity,
            )
            .with("number", field::number)
            .with_all(
                &[
                    "hash",
                    "parentHash",
                    "sha3Uncles",
                    "stateRoot",
                    "transactionsRoot",
                    "receiptsRoot",
                    "mixHash",
                    "withdrawalsRoot",
                    "parentBeaconBlockRoot",
                ],
                field::hash,
            )
            .with("miner", field::address)
            .with_all(&["nonce", "logsBloom", "extraData"], field::data);

        let transaction = FieldTable::new()
            .with_all(&["gas", "value"], field::quantity)
            .with_all(FEE_FIELDS, field::fee)
            .with_all(&["blockNumber", "nonce", "transactionIndex", "chainId", "v"], field::number)
            .with_all(&["r", "s"], field::quantity)
            .with("yParity", field::number)
            .with_all(&["hash", "blockHash"], field::hash)
            .with_all(&["from", "to"], field::address)
            .with("input", field::data)
            .with("type", field::ethereum_tx_type);

        let transaction_receipt = FieldTable::new()
            .with_all(&["blockNumber", "transactionIndex"], field::number)
            .with_all(
                &["cumulativeGasUsed", "effectiveGasPrice", "gasUsed", "blobGasUsed", "blobGasPrice"],
                field::quantity,
            )
            .with_all(&["transactionHash", "blockHash"], field::hash)
            .with_all(&["from", "to", "contractAddress"], field::address)
            .with("logsBloom", field::data)
            .with("status", field::receipt_status)
            .with("type", field::ethereum_tx_type);

        let transaction_request = FieldTable::new()
            .with_all(&["gas", "value"], field::quantity)
            .with_all(FEE_FIELDS, field::fee)
            .with_all(&["nonce", "chainId"], field::number)
            .with_all(&["from", "to"], field::address)
            .with_all(&["data", "input"], field::data)
            .with("type", field::ethereum_tx_type);

        Self { block, transaction, transaction_receipt, transaction_request }
    }
}

/// Formatter configuration for one chain: the shared wire coercion (`replacer`), the chain's
/// own overrides (`formatters`) and the transaction types it accepts.
#[derive(Debug, Clone, Builder)]
pub struct ChainFormatters {
    pub name: &'static str,
    #[builder(default = EntityTables::ethereum())]
    pub replacer: EntityTables,
    #[builder(default)]
    pub formatters: EntityTables,
    #[builder(default = vec![TxType::Legacy, TxType::Eip2930, TxType::Eip1559])]
    pub tx_types: Vec<TxType>,
}

impl ChainFormatters {
    pub fn ethereum() -> Self {
        Self::builder().name("ethereum").build()
    }

    /// Celo: fee currency transactions, block randomness, and no proof-of-work fields.
    pub fn celo() -> Self {
        let celo_tx = |table: FieldTable| {
            table
                .with("type", field::celo_tx_type)
                .with("feeCurrency", field::fee_currency)
                .with("gatewayFeeRecipient", field::address)
                .with("gatewayFee", field::quantity)
        };

        let formatters = EntityTables::builder()
            .block(
                FieldTable::new()
                    .with("randomness", field::randomness)
                    .with_all(&["difficulty", "gasLimit", "mixHash", "nonce", "uncles"], field::remove),
            )
            .transaction(celo_tx(FieldTable::new()))
            .transaction_receipt(FieldTable::new().with("type", field::celo_tx_type))
            .transaction_request(celo_tx(FieldTable::new()))
            .build();

        Self::builder()
            .name("celo")
            .formatters(formatters)
            .tx_types(vec![
                TxType::Legacy,
                TxType::Eip2930,
                TxType::Eip1559,
                TxType::Cip42,
                TxType::Cip64,
            ])
            .build()
    }

    pub fn options(&self, entity: Entity) -> FormatOptions<'_> {
        FormatOptions::builder()
            .formatters(self.formatters.get(entity))
            .replacer(self.replacer.get(entity))
            .build()
    }

    #[inline]
    pub fn supports(&self, tx_type: TxType) -> bool {
        self.tx_types.contains(&tx_type)
    }

    /// Format a single RPC object.
    pub fn format(&self, entity: Entity, value: &Value) -> Result<Formatted, FormatError> {
        let object = value.as_object().ok_or(FormatError::ExpectedObject(entity.as_str()))?;
        format(object, self.options(entity))
    }

    /// Format a block and the transaction objects embedded in it. Transaction hashes (blocks
    /// fetched without full transactions) become [`Field::Hash`].
    pub fn format_block(&self, value: &Value) -> Result<Formatted, FormatError> {
        let mut block = self.format(Entity::Block, value)?;

        let Some(Field::Raw(Value::Array(transactions))) = block.get("transactions") else {
            return Ok(block);
        };
        let transactions = transactions
            .iter()
            .map(|tx| match tx {
                Value::Object(_) => self.format(Entity::Transaction, tx).map(Field::Object),
                other => Ok(field::hash("transactions", other)?.unwrap_or(Field::Raw(Value::Null))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(chain = self.name, count = transactions.len(), "formatted block transactions");
        block.insert("transactions".to_string(), Field::List(transactions));
        Ok(block)
    }
}
