use std::collections::BTreeMap;

use bon::Builder;
use serde_json::{Map, Value};

use crate::{Field, FieldTransform, FormatError, Formatted};

/// RPC entities that carry a formatter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Block,
    Transaction,
    TransactionReceipt,
    TransactionRequest,
}

impl Entity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Transaction => "transaction",
            Self::TransactionReceipt => "transactionReceipt",
            Self::TransactionRequest => "transactionRequest",
        }
    }
}

/// Field name to transform mapping for one entity.
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    entries: BTreeMap<&'static str, FieldTransform>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the transform for `name`.
    pub fn with(mut self, name: &'static str, transform: FieldTransform) -> Self {
        self.entries.insert(name, transform);
        self
    }

    /// Same transform for several fields.
    pub fn with_all(mut self, names: &[&'static str], transform: FieldTransform) -> Self {
        for &name in names {
            self.entries.insert(name, transform);
        }
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<FieldTransform> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tables applied by [`format`]. `formatters` wins over `replacer` for the same field.
#[derive(Debug, Clone, Copy, Builder)]
pub struct FormatOptions<'a> {
    pub formatters: &'a FieldTable,
    pub replacer: Option<&'a FieldTable>,
}

/// Apply the tables to every top-level field of `value`. Nested objects are left as they are.
pub fn format(value: &Map<String, Value>, options: FormatOptions<'_>) -> Result<Formatted, FormatError> {
    let mut out = Formatted::new();
    for (name, raw) in value {
        let transform =
            options.formatters.get(name).or_else(|| options.replacer.and_then(|r| r.get(name)));

        let field = match transform {
            Some(transform) => transform(name, raw)?,
            None => Some(Field::Raw(raw.clone())),
        };
        match field {
            Some(field) => {
                out.insert(name.clone(), field);
            }
            None => tracing::trace!(field = %name, "dropped by formatter"),
        }
    }
    Ok(out)
}
