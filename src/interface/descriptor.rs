//! Canonical interface form.
//!
//! Whatever shape a declaration arrives in, [`Interface::normalize`] reduces it
//! to name → `"function"` mappings. The result serializes as
//! `{"required": {...}}` with an `optional` mapping only when the declaration
//! carried an `optional` block (see `schema/interface_descriptor.schema.json`).

use crate::interface::declaration::{Block, Declaration};
use crate::interface::identity::MemberKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Ordered mapping from method name to its marker.
pub type Members = IndexMap<String, MemberKind>;

/// Normalized interface: which methods must, and which may, be callable.
///
/// Deserializing accepts only the canonical shape and drops empty names, the
/// same way [`Interface::normalize`] does.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CanonicalInterface")]
pub struct Interface {
    required: Members,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional: Option<Members>,
}

#[derive(Deserialize)]
struct CanonicalInterface {
    #[serde(default)]
    required: Members,
    #[serde(default)]
    optional: Option<Members>,
}

impl From<CanonicalInterface> for Interface {
    fn from(raw: CanonicalInterface) -> Self {
        Interface {
            required: without_empty_names(raw.required, "required"),
            optional: raw
                .optional
                .map(|optional| without_empty_names(optional, "optional")),
        }
    }
}

impl Interface {
    /// Reduce a declaration to canonical form. Never fails; empty names are
    /// dropped and duplicates keep their first position.
    pub fn normalize(declaration: &Declaration) -> Self {
        match declaration {
            Declaration::Absent => Interface::default(),
            Declaration::Sequence(names) => Interface {
                required: members(names, "required"),
                optional: None,
            },
            Declaration::Structured { required, optional } => Interface {
                required: required
                    .as_ref()
                    .map(|block| block_members(block, "required"))
                    .unwrap_or_default(),
                optional: optional
                    .as_ref()
                    .map(|block| block_members(block, "optional")),
            },
        }
    }

    pub fn required(&self) -> &Members {
        &self.required
    }

    pub fn optional(&self) -> Option<&Members> {
        self.optional.as_ref()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.get(name) == Some(&MemberKind::Function)
    }

    pub fn is_optional(&self, name: &str) -> bool {
        self.optional
            .as_ref()
            .is_some_and(|optional| optional.contains_key(name))
    }

    /// Required method names in interface order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required.keys().map(String::as_str)
    }

    /// Optional method names in interface order; empty when no optional
    /// block was declared.
    pub fn optional_names(&self) -> impl Iterator<Item = &str> {
        self.optional
            .iter()
            .flat_map(|optional| optional.keys().map(String::as_str))
    }
}

impl From<&Declaration> for Interface {
    fn from(declaration: &Declaration) -> Self {
        Interface::normalize(declaration)
    }
}

fn block_members(block: &Block, label: &str) -> Members {
    members(block.names(), label)
}

fn without_empty_names(mut members: Members, label: &str) -> Members {
    members.retain(|name, _| {
        if name.is_empty() {
            trace!(block = label, "dropping empty method name");
        }
        !name.is_empty()
    });
    members
}

fn members(names: &[String], label: &str) -> Members {
    let mut out = Members::new();
    for name in names {
        if name.is_empty() {
            trace!(block = label, "dropping empty method name");
            continue;
        }
        out.entry(name.clone()).or_insert(MemberKind::Function);
    }
    out
}
