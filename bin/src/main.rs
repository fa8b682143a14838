//! `evmcodec` command line: selectors, ABI encoding, RLP and transactions.

use alloy_primitives::hex;
use clap::{Parser, Subcommand, ValueEnum};
use evmcodec::{
    abi::{
        decode_function_data, decode_function_result, encode_function_data, event_selector,
        function_selector, params_from_abi, parse_abi_item,
    },
    from_rlp, parse_transaction, serialize_transaction, sign_transaction, to_rlp,
    transaction::{recover_signer, transaction_hash},
    AbiValue,
};
use evmcodec_format::{
    request_from_transaction, rlp_from_json, rlp_to_json, transaction_from_request,
    value_from_json, value_to_json, ChainFormatters,
};
use evmcodec_types::{AbiFunction, AbiItem};
use eyre::{bail, eyre, Result};
use k256::ecdsa::SigningKey;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evmcodec", version)]
#[command(about = "Encode and decode EVM ABI data, RLP and transactions")]
struct Args {
    /// Chain whose transaction types and formatters apply
    #[arg(long, value_enum, default_value = "ethereum", env = "EVMCODEC_CHAIN", global = true)]
    chain: Chain,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Chain {
    Ethereum,
    Celo,
}

impl Chain {
    fn formatters(self) -> ChainFormatters {
        match self {
            Self::Ethereum => ChainFormatters::ethereum(),
            Self::Celo => ChainFormatters::celo(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the 4-byte selector of a function (or the topic of an event)
    Selector {
        signature: String,
        #[arg(long)]
        event: bool,
    },
    /// Encode call data from a signature and a JSON array of arguments
    Encode { signature: String, args: String },
    /// Decode call data (or return data with --output) against a signature
    Decode {
        signature: String,
        data: String,
        #[arg(long)]
        output: bool,
    },
    #[command(subcommand)]
    Rlp(RlpCommand),
    #[command(subcommand)]
    Tx(TxCommand),
}

#[derive(Subcommand)]
enum RlpCommand {
    /// Encode nested JSON arrays of hex strings
    Encode { json: String },
    /// Decode hex into nested JSON arrays
    Decode { data: String },
}

#[derive(Subcommand)]
enum TxCommand {
    /// Parse a serialized transaction into an RPC request object
    Parse { data: String },
    /// Serialize a JSON transaction request
    Serialize { request: String },
    /// Sign a JSON transaction request
    Sign {
        request: String,
        /// Hex encoded secp256k1 private key
        #[arg(long, env = "EVMCODEC_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,evmcodec=debug")),
        )
        .init();

    let args = Args::parse();
    let chain = args.chain.formatters();

    let output = match args.command {
        Command::Selector { signature, event } => {
            if event {
                Value::String(event_selector(&signature)?.to_string())
            } else {
                Value::String(hex::encode_prefixed(function_selector(&signature)?))
            }
        }
        Command::Encode { signature, args } => encode(&signature, &args)?,
        Command::Decode { signature, data, output } => decode(&signature, &data, output)?,
        Command::Rlp(RlpCommand::Encode { json }) => {
            let item = rlp_from_json(&serde_json::from_str(&json)?)?;
            Value::String(hex::encode_prefixed(to_rlp(&item)))
        }
        Command::Rlp(RlpCommand::Decode { data }) => rlp_to_json(&from_rlp(&hex::decode(&data)?)?),
        Command::Tx(TxCommand::Parse { data }) => {
            let bytes = hex::decode(&data)?;
            let tx = parse_transaction(&bytes)?;
            info!(tx_type = tx.tx_type().as_str(), "parsed transaction");

            let mut request = request_from_transaction(&tx);
            if let Some(object) = request.as_object_mut() {
                if tx.signature().is_some() {
                    object.insert("hash".into(), transaction_hash(&bytes).to_string().into());
                    object.insert("from".into(), recover_signer(&tx)?.to_checksum(None).into());
                }
            }
            request
        }
        Command::Tx(TxCommand::Serialize { request }) => {
            let tx = transaction_from_request(&serde_json::from_str(&request)?, &chain)?;
            Value::String(hex::encode_prefixed(serialize_transaction(&tx, None)?))
        }
        Command::Tx(TxCommand::Sign { request, private_key }) => {
            let tx = transaction_from_request(&serde_json::from_str(&request)?, &chain)?;
            let key = SigningKey::from_slice(&hex::decode(private_key.trim())?)
                .map_err(|e| eyre!("invalid private key: {e}"))?;
            let signed = sign_transaction(&tx, &key)?;
            info!(hash = %transaction_hash(&signed), "signed transaction");
            Value::String(hex::encode_prefixed(signed))
        }
    };

    match output {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}

fn parse_function(signature: &str) -> Result<AbiFunction> {
    match parse_abi_item(signature)? {
        AbiItem::Function(function) => Ok(function),
        other => bail!("{signature:?} is a {}, not a function", other.kind()),
    }
}

fn encode(signature: &str, args: &str) -> Result<Value> {
    let function = parse_function(signature)?;
    let json: Value = serde_json::from_str(args)?;
    let Value::Array(json_args) = json else {
        bail!("arguments must be a JSON array");
    };
    let params = params_from_abi(&function.inputs)?;
    if params.len() != json_args.len() {
        bail!("{} expects {} arguments, given {}", function.name, params.len(), json_args.len());
    }

    let values = params
        .iter()
        .zip(&json_args)
        .map(|(param, arg)| value_from_json(&param.kind, arg))
        .collect::<Result<Vec<AbiValue>, _>>()?;
    debug!(function = %function.name, args = values.len(), "encoding call");

    let abi = [AbiItem::Function(function.clone())];
    let data = encode_function_data(&abi, &function.name, &values)?;
    Ok(Value::String(hex::encode_prefixed(data)))
}

fn decode(signature: &str, data: &str, output: bool) -> Result<Value> {
    let function = parse_function(signature)?;
    let bytes = hex::decode(data)?;
    let abi = [AbiItem::Function(function.clone())];

    let values = if output {
        decode_function_result(&abi, &function.name, &bytes)?
    } else {
        decode_function_data(&abi, &bytes)?.args
    };
    Ok(Value::Array(values.iter().map(value_to_json).collect()))
}
