//! Runtime interface descriptors for dynamically-shaped objects.
//!
//! The crate normalizes loose interface declarations (lists of method names,
//! or mappings with `required`/`optional` blocks) into a canonical
//! [`Interface`] and exposes [`Methodical`] to consult it against values from
//! the dynamic object model in [`object`]: check conformance, fill gaps with a
//! shared no-op, or call a method only when it is present or required.
//!
//! The helpers at this level back the `methodical` binary: declaration
//! loading from disk or text, and list splitting for command-line input.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

pub mod error;
pub mod interface;
pub mod object;

pub use error::{InterfaceError, InvocationError};
pub use interface::{
    Block, Declaration, FUNCTION, Interface, MemberKind, Members, Methodical,
};
pub use object::{NativeFn, Object, PROTOTYPE_KEY, Value, no_op};

/// Environment variable consulted for a descriptor name when none is given
/// explicitly.
pub const INTERFACE_NAME_ENV: &str = "METHODICAL_INTERFACE_NAME";

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a declaration from JSON text.
///
/// Empty input is an error because it almost always means a missing file or
/// pipe, not an intentionally absent declaration; pass `null` for that.
/// Malformed fragments inside valid JSON are tolerated as usual.
pub fn parse_declaration(input: &str) -> Result<Declaration> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No declaration provided");
    }
    let declaration: Declaration =
        serde_json::from_str(trimmed).context("Unable to parse interface declaration")?;
    Ok(declaration)
}

/// Read and parse a declaration file.
pub fn load_declaration_from_path(path: &Path) -> Result<Declaration> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_declaration(&data).with_context(|| format!("loading {}", path.display()))
}

/// Resolve the descriptor name: explicit value first, then
/// [`INTERFACE_NAME_ENV`]. Blank values count as unset.
pub fn resolve_interface_name(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| std::env::var(INTERFACE_NAME_ENV).ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Build an object whose listed members are callables, for checking a
/// method list against an interface.
pub fn object_implementing<I, S>(methods: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let object = Object::new();
    for method in methods {
        object.set(method, Value::Object(no_op()));
    }
    Value::Object(object)
}
