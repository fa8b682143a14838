//! Shared types for the evmcodec crate family.
//!
//! These mirror the JSON ABI as emitted by solc and accepted by most tooling,
//! so an ABI file can be deserialized directly with `serde_json`.

use serde::{Deserialize, Serialize};

/// A single input/output of an ABI item.
///
/// `ty` holds the raw Solidity type string (`uint256`, `tuple[]`, ...). Tuples keep their
/// members in `components`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiParameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParameter>,
    /// Only meaningful for event inputs.
    #[serde(default, skip_serializing_if = "is_false")]
    pub indexed: bool,
}

impl AbiParameter {
    /// Create an unnamed parameter of the given type.
    pub fn new(ty: impl Into<String>) -> Self {
        Self { ty: ty.into(), ..Default::default() }
    }

    /// Create a named parameter of the given type.
    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into(), ..Default::default() }
    }

    /// Create a tuple parameter (`tuple`, `tuple[]`, `tuple[2]`, ...).
    pub fn tuple(ty: impl Into<String>, components: Vec<AbiParameter>) -> Self {
        Self { ty: ty.into(), components, ..Default::default() }
    }

    /// Mark this parameter as indexed (builder pattern).
    #[inline]
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    Nonpayable,
    Payable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub outputs: Vec<AbiParameter>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbiEvent {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbiCustomError {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiConstructor {
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

/// One entry of a JSON ABI, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiItem {
    Function(AbiFunction),
    Event(AbiEvent),
    Error(AbiCustomError),
    Constructor(AbiConstructor),
    #[serde(rename_all = "camelCase")]
    Fallback {
        #[serde(default)]
        state_mutability: StateMutability,
    },
    #[serde(rename_all = "camelCase")]
    Receive {
        #[serde(default)]
        state_mutability: StateMutability,
    },
}

impl AbiItem {
    /// Name of the item, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(f) => Some(&f.name),
            Self::Event(e) => Some(&e.name),
            Self::Error(e) => Some(&e.name),
            Self::Constructor(_) | Self::Fallback { .. } | Self::Receive { .. } => None,
        }
    }

    /// Inputs of the item (empty for fallback/receive).
    pub fn inputs(&self) -> &[AbiParameter] {
        match self {
            Self::Function(f) => &f.inputs,
            Self::Event(e) => &e.inputs,
            Self::Error(e) => &e.inputs,
            Self::Constructor(c) => &c.inputs,
            Self::Fallback { .. } | Self::Receive { .. } => &[],
        }
    }

    /// Short lowercase label of the item kind, as found in the JSON `type` field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Event(_) => "event",
            Self::Error(_) => "error",
            Self::Constructor(_) => "constructor",
            Self::Fallback { .. } => "fallback",
            Self::Receive { .. } => "receive",
        }
    }
}

/// A full contract ABI.
pub type Abi = Vec<AbiItem>;

fn is_false(value: &bool) -> bool {
    !*value
}
