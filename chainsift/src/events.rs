use std::collections::HashMap;

use derive_more::Display;
use ethers::abi::{HumanReadableParser, ParamType, Token};
use ethers::types::Log;

use crate::hashes::Hashes;

/// Schema of one contract event: canonical signature plus the ordered
/// (name, type, indexed?) field list the decoder honors.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub fields: Vec<EventField>,
    pub(crate) value: ethers::abi::Event,
}

#[derive(Debug, Clone)]
pub struct EventField {
    pub name: String,
    pub kind: ParamType,
    pub indexed: bool,
}

impl Event {
    pub fn new(abi: &str) -> Self {
        let value = HumanReadableParser::parse_event(abi).unwrap();

        let fields = value
            .inputs
            .iter()
            .map(|input| EventField {
                name: input.name.to_string(),
                kind: input.kind.clone(),
                indexed: input.indexed,
            })
            .collect();

        Self {
            name: value.name.to_string(),
            fields,
            value,
        }
    }

    /// Canonical signature string, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        let kinds: Vec<_> = self.fields.iter().map(|f| f.kind.to_string()).collect();

        format!("{}({})", self.name, kinds.join(","))
    }
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub(crate) value: ethers::abi::Function,
}

impl Method {
    pub fn new(abi: &str) -> Self {
        let value = HumanReadableParser::parse_function(abi).unwrap();

        Self {
            name: value.name.to_string(),
            value,
        }
    }

    pub fn arg_kinds(&self) -> Vec<ParamType> {
        self.value.inputs.iter().map(|input| input.kind.clone()).collect()
    }
}

/// A decoded log, generic across event types: ordered column values plus
/// the raw payload and the indices that key the row within its header.
#[derive(Debug, Clone, PartialEq)]
pub struct EventModel {
    pub event_name: String,
    pub values: Vec<(String, String)>,
    pub raw_log: serde_json::Value,
    pub transaction_index: i64,
    pub log_index: i64,
}

impl EventModel {
    pub fn named_values(&self) -> HashMap<String, String> {
        self.values.iter().cloned().collect()
    }

    pub fn get(&self, field_name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Display)]
pub enum DecodeError {
    InvalidLog(String),
    MissingLogField(&'static str),
}

/// Seam for the interface-description decoder. The default implementation
/// decodes through the parsed ABI; tests substitute shape-mismatch doubles.
pub trait LogDecoder: Send + Sync {
    fn decode(&self, event: &Event, log: &Log) -> Result<EventModel, DecodeError>;
}

#[derive(Clone, Default)]
pub struct AbiDecoder;

impl LogDecoder for AbiDecoder {
    fn decode(&self, event: &Event, log: &Log) -> Result<EventModel, DecodeError> {
        let parsed = event
            .value
            .parse_log(log.clone().into())
            .map_err(|error| DecodeError::InvalidLog(error.to_string()))?;

        let transaction_index = log
            .transaction_index
            .ok_or(DecodeError::MissingLogField("transaction_index"))?
            .as_u64() as i64;
        let log_index = log
            .log_index
            .ok_or(DecodeError::MissingLogField("log_index"))?
            .as_u64() as i64;

        let values = parsed
            .params
            .iter()
            .map(|param| (param.name.to_string(), token_to_string(&param.value)))
            .collect();

        Ok(EventModel {
            event_name: event.name.to_string(),
            values,
            raw_log: serde_json::to_value(log).unwrap(),
            transaction_index,
            log_index,
        })
    }
}

pub(crate) fn token_to_string(token: &Token) -> String {
    match token {
        Token::Address(address) => Hashes::h160_to_string(address).to_lowercase(),
        Token::FixedBytes(bytes) | Token::Bytes(bytes) => to_hex(bytes),
        Token::Uint(value) | Token::Int(value) => value.to_string(),
        Token::Bool(value) => value.to_string(),
        Token::String(value) => value.to_string(),
        other => other.to_string(),
    }
}

fn to_hex(bytes: &[u8]) -> String {
    let body: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();

    format!("0x{body}")
}
