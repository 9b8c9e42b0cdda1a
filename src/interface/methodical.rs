//! Interface descriptors consulted against live objects.

use crate::error::{InterfaceError, InvocationError};
use crate::interface::declaration::Declaration;
use crate::interface::descriptor::Interface;
use crate::object::{Object, PROTOTYPE_KEY, Value, no_op};
use tracing::debug;

/// A normalized interface plus an optional display name.
///
/// Built once from a declaration; the interface never changes afterwards.
/// The name only affects the message produced by [`Methodical::check`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Methodical {
    interface: Interface,
    name: Option<String>,
}

impl Methodical {
    pub fn new(declaration: impl Into<Declaration>) -> Self {
        Self {
            interface: Interface::normalize(&declaration.into()),
            name: None,
        }
    }

    /// Build from a JSON declaration (list, mapping, or null).
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self::new(Declaration::from_value(value))
    }

    /// Require every callable member of the constructor's `prototype`.
    ///
    /// Members are taken in property order; non-callable members are skipped.
    /// A callable with no object `prototype` yields an empty interface.
    pub fn from_constructor(constructor: &Value) -> Result<Self, InterfaceError> {
        if !constructor.is_callable() {
            return Err(InterfaceError::Construction);
        }
        let methods: Vec<String> = match constructor.get(PROTOTYPE_KEY) {
            Value::Object(prototype) => prototype
                .entries()
                .into_iter()
                .filter(|(_, value)| value.is_callable())
                .map(|(key, _)| key)
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self::new(Declaration::Sequence(methods)))
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Attach a display name; an empty name clears it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Verify every required method is callable on `object`.
    ///
    /// Values that are not object-like are checked as an empty object, so
    /// the error always lists every required method rather than failing on
    /// the input's shape.
    pub fn check(&self, object: &Value) -> Result<(), InterfaceError> {
        let target = surrogate(object);
        let missing: Vec<String> = self
            .interface
            .required()
            .iter()
            .filter(|(name, kind)| !kind.matches(target.get(name).type_of()))
            .map(|(name, _)| name.clone())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        debug!(
            interface = self.name.as_deref().unwrap_or_default(),
            missing = ?missing,
            "object does not conform"
        );
        Err(InterfaceError::Conformance {
            name: self.name.clone(),
            missing,
        })
    }

    /// Fill every non-callable required method with the shared no-op.
    ///
    /// Existing callables, including ones inherited through the prototype
    /// chain, are left untouched. Optional methods are never filled.
    pub fn complete(&self, object: &Value) -> Result<(), InterfaceError> {
        let Value::Object(target) = object else {
            return Err(InterfaceError::Completion);
        };
        for (name, kind) in self.interface.required() {
            if !kind.matches(target.get(name).type_of()) {
                debug!(method = %name, "filling missing method with no-op");
                target.set(name.clone(), Value::Object(no_op()));
            }
        }
        Ok(())
    }

    /// Call `method` on `object` with trailing arguments.
    pub fn try_call<I>(&self, object: &Value, method: &str, args: I) -> Result<(), InterfaceError>
    where
        I: IntoIterator<Item = Value>,
    {
        let args: Vec<Value> = args.into_iter().collect();
        self.try_apply(object, method, &args)
    }

    /// Call `method` on `object` when it is callable or required.
    ///
    /// A callable property is invoked with `object` as receiver and its result
    /// discarded. A required method that is not callable is invoked anyway,
    /// which fails with [`InvocationError::NotCallable`]. Anything else is a
    /// no-op.
    pub fn try_apply(
        &self,
        object: &Value,
        method: &str,
        args: &[Value],
    ) -> Result<(), InterfaceError> {
        let property = surrogate(object).get(method);
        if property.is_callable() || self.interface.is_required(method) {
            invoke(&property, object, method, args)?;
        }
        Ok(())
    }
}

/// Object-like values pass through; anything else becomes an empty object.
fn surrogate(value: &Value) -> Object {
    value.as_object().cloned().unwrap_or_default()
}

fn invoke(
    property: &Value,
    receiver: &Value,
    method: &str,
    args: &[Value],
) -> Result<Value, InvocationError> {
    match property {
        Value::Object(function) if function.is_callable() => function.call(receiver, args),
        other => Err(InvocationError::NotCallable {
            method: method.to_string(),
            found: other.type_of(),
        }),
    }
}
