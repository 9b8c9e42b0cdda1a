//! Error kinds surfaced by interface descriptors.
//!
//! Construction from a raw declaration never fails; everything here comes from
//! the operations that consult a descriptor against a live object.

use thiserror::Error;

/// Failure raised by a descriptor operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterfaceError {
    /// `from_constructor` was handed something that is not callable.
    #[error("A function must be passed")]
    Construction,

    /// `check` found one or more required methods missing.
    #[error("{}", conformance_message(.name.as_deref(), .missing))]
    Conformance {
        name: Option<String>,
        missing: Vec<String>,
    },

    /// `complete` was handed something that is neither callable nor object-like.
    #[error("Cannot complete a non-object")]
    Completion,

    /// Raised while invoking a method through `try_call`/`try_apply`.
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl InterfaceError {
    /// Missing required method names, in interface order. Empty for every
    /// variant other than `Conformance`.
    pub fn missing(&self) -> &[String] {
        match self {
            InterfaceError::Conformance { missing, .. } => missing,
            _ => &[],
        }
    }
}

/// Failure raised by calling a property as a function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvocationError {
    /// The property at `method` holds a value of type `found`, not a callable.
    #[error("{method} is not a function (found {found})")]
    NotCallable { method: String, found: &'static str },

    /// A native method reported its own failure.
    #[error("{0}")]
    Thrown(String),
}

impl InvocationError {
    pub fn thrown(message: impl Into<String>) -> Self {
        InvocationError::Thrown(message.into())
    }
}

fn conformance_message(name: Option<&str>, missing: &[String]) -> String {
    let intro = match name {
        Some(name) => format!("The object does not conform to the \"{name}\" interface: "),
        None => "The object does not conform to the interface: ".to_string(),
    };
    let details = missing
        .iter()
        .map(|method| format!("The required method \"{method}\" is not implemented"))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{intro}{details}")
}
