//! Event topics and log decoding.

use alloy_primitives::{keccak256, Bytes, B256};
use evmcodec_types::{AbiEvent, AbiItem};

use super::{
    decode_abi_parameters, encode_abi_parameters, item_topic, params_from_abi, AbiError, AbiValue,
    Param, ParamType,
};

/// An event decoded from a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub name: String,
    /// Arguments in declaration order. Unnamed inputs are keyed by their position.
    ///
    /// Indexed `string`, `bytes`, tuple and array inputs are only present as their topic
    /// hash, returned as [`AbiValue::FixedBytes`].
    pub args: Vec<(String, AbiValue)>,
}

/// Build the topic filter for event `name`.
///
/// `args` lines up with the event's indexed inputs; `None` (or a missing trailing entry)
/// matches any value. The first topic is the event selector unless the event is anonymous.
pub fn encode_event_topics(
    abi: &[AbiItem],
    name: &str,
    args: &[Option<AbiValue>],
) -> Result<Vec<Option<B256>>, AbiError> {
    let event = abi
        .iter()
        .find_map(|item| match item {
            AbiItem::Event(event) if event.name == name => Some(event),
            _ => None,
        })
        .ok_or_else(|| AbiError::EventNotFound(name.to_string()))?;

    let indexed: Vec<Param> =
        params_from_abi(&event.inputs)?.into_iter().filter(|p| p.indexed).collect();
    if args.len() > indexed.len() {
        return Err(AbiError::LengthMismatch { expected: indexed.len(), given: args.len() });
    }

    let mut topics = Vec::with_capacity(indexed.len() + 1);
    if !event.anonymous {
        topics.push(Some(item_topic(&AbiItem::Event(event.clone()))?));
    }
    for (param, arg) in indexed.iter().zip(args) {
        topics.push(arg.as_ref().map(|value| encode_topic(param, value)).transpose()?);
    }
    Ok(topics)
}

fn encode_topic(param: &Param, value: &AbiValue) -> Result<B256, AbiError> {
    match (&param.kind, value) {
        (ParamType::String, AbiValue::String(string)) => Ok(keccak256(string.as_bytes())),
        (ParamType::Bytes, AbiValue::Bytes(bytes)) => Ok(keccak256(bytes)),
        (kind @ (ParamType::Tuple(_) | ParamType::Array { .. }), _) => {
            Err(AbiError::FilterTypeNotSupported(kind.canonical()))
        }
        _ => {
            let word = encode_abi_parameters(std::slice::from_ref(param), std::slice::from_ref(value))?;
            Ok(B256::from_slice(&word))
        }
    }
}

/// Decode a log against the first non-anonymous event whose selector equals `topics[0]`.
pub fn decode_event_log(
    abi: &[AbiItem],
    topics: &[B256],
    data: &[u8],
) -> Result<DecodedEvent, AbiError> {
    let (signature, indexed_topics) =
        topics.split_first().ok_or(AbiError::EventSignatureEmptyTopics)?;

    let event = find_event_by_topic(abi, signature)?
        .ok_or(AbiError::EventSignatureNotFound(*signature))?;
    tracing::debug!(name = %event.name, "matched event topic");

    let params = params_from_abi(&event.inputs)?;
    let indexed_count = params.iter().filter(|p| p.indexed).count();
    if indexed_topics.len() < indexed_count {
        return Err(AbiError::TopicsMismatch {
            event: event.name.clone(),
            expected: indexed_count,
            given: indexed_topics.len(),
        });
    }

    let non_indexed: Vec<Param> = params.iter().filter(|p| !p.indexed).cloned().collect();
    let mut data_values = decode_abi_parameters(&non_indexed, data)?.into_iter();
    let mut topic_values = indexed_topics.iter();

    let mut args = Vec::with_capacity(params.len());
    for (position, param) in params.iter().enumerate() {
        let value = if param.indexed {
            let topic = topic_values.next().ok_or(AbiError::TopicsMismatch {
                event: event.name.clone(),
                expected: indexed_count,
                given: indexed_topics.len(),
            })?;
            decode_topic(param, topic)?
        } else {
            data_values.next().ok_or(AbiError::DataSizeTooSmall { expected: 32, given: data.len() })?
        };
        let key = param.name.clone().unwrap_or_else(|| position.to_string());
        args.push((key, value));
    }

    Ok(DecodedEvent { name: event.name.clone(), args })
}

fn find_event_by_topic<'a>(abi: &'a [AbiItem], topic: &B256) -> Result<Option<&'a AbiEvent>, AbiError> {
    for item in abi {
        if let AbiItem::Event(event) = item {
            if !event.anonymous && item_topic(item)? == *topic {
                return Ok(Some(event));
            }
        }
    }
    Ok(None)
}

fn decode_topic(param: &Param, topic: &B256) -> Result<AbiValue, AbiError> {
    if param.kind.is_dynamic() || matches!(param.kind, ParamType::Tuple(_) | ParamType::Array { .. }) {
        return Ok(AbiValue::FixedBytes(Bytes::copy_from_slice(topic.as_slice())));
    }
    let mut values = decode_abi_parameters(std::slice::from_ref(param), topic.as_slice())?;
    values.pop().ok_or(AbiError::ZeroData)
}
