//! Raw interface declarations.
//!
//! Callers describe an interface in one of several loose shapes: nothing at
//! all, a flat list of method names, or a mapping with `required`/`optional`
//! blocks that are themselves lists or mappings. [`Declaration::from_value`]
//! classifies a JSON value into one of those shapes. Fragments that fit none
//! of them are dropped here, never reported as errors, so a partially
//! malformed declaration still yields a usable interface.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::trace;

const REQUIRED_KEY: &str = "required";
const OPTIONAL_KEY: &str = "optional";

/// A parsed interface declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Declaration {
    /// No declaration; yields an empty `required` block.
    #[default]
    Absent,
    /// Flat list of names, all required.
    Sequence(Vec<String>),
    /// Mapping with independent `required` and `optional` blocks.
    Structured {
        required: Option<Block>,
        optional: Option<Block>,
    },
}

/// One `required`/`optional` block of a structured declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// `["name", ...]`
    Sequence(Vec<String>),
    /// `{"name": <ignored>, ...}`; only the keys matter.
    Keys(Vec<String>),
}

impl Block {
    /// Candidate method names in declaration order, before empty names are
    /// filtered out.
    pub fn names(&self) -> &[String] {
        match self {
            Block::Sequence(names) | Block::Keys(names) => names,
        }
    }

    fn from_value(value: &Value, block: &str) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Block::Sequence(string_entries(items, block))),
            Value::Object(map) => Some(Block::Keys(map.keys().cloned().collect())),
            Value::Null => None,
            other => {
                trace!(block, entry = %other, "ignoring declaration block that is neither list nor mapping");
                None
            }
        }
    }
}

impl Declaration {
    /// Classify a JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Declaration::Absent,
            Value::Array(items) => Declaration::Sequence(string_entries(items, REQUIRED_KEY)),
            Value::Object(map) => Declaration::Structured {
                required: map
                    .get(REQUIRED_KEY)
                    .and_then(|block| Block::from_value(block, REQUIRED_KEY)),
                optional: map
                    .get(OPTIONAL_KEY)
                    .and_then(|block| Block::from_value(block, OPTIONAL_KEY)),
            },
            other => {
                trace!(entry = %other, "ignoring declaration that is neither list nor mapping");
                Declaration::Absent
            }
        }
    }

    pub fn required(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Declaration::Sequence(owned_names(names))
    }

    /// Structured declaration built from two name lists.
    pub fn with_optional(
        required: impl IntoIterator<Item = impl Into<String>>,
        optional: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Declaration::Structured {
            required: Some(Block::Sequence(owned_names(required))),
            optional: Some(Block::Sequence(owned_names(optional))),
        }
    }
}

fn owned_names(names: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    names.into_iter().map(Into::into).collect()
}

fn string_entries(items: &[Value], block: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name.clone()),
            other => {
                trace!(block, entry = %other, "dropping non-string method name");
                None
            }
        })
        .collect()
}

impl From<&Value> for Declaration {
    fn from(value: &Value) -> Self {
        Declaration::from_value(value)
    }
}

impl From<Value> for Declaration {
    fn from(value: Value) -> Self {
        Declaration::from_value(&value)
    }
}

impl From<Vec<&str>> for Declaration {
    fn from(names: Vec<&str>) -> Self {
        Declaration::required(names)
    }
}

impl From<Vec<String>> for Declaration {
    fn from(names: Vec<String>) -> Self {
        Declaration::Sequence(names)
    }
}

impl<const N: usize> From<[&str; N]> for Declaration {
    fn from(names: [&str; N]) -> Self {
        Declaration::required(names)
    }
}

impl<T: Into<Declaration>> From<Option<T>> for Declaration {
    fn from(declaration: Option<T>) -> Self {
        declaration.map(Into::into).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
