//! Dynamic object model that interface descriptors are checked against.
//!
//! Values here have a shape that is only known at runtime: plain objects,
//! arrays, and callables all carry an ordered property table and an optional
//! prototype link. Objects are shared handles with reference identity, so a
//! method filled in by `complete` is observable through every clone of the
//! handle. The model is single-threaded (`Rc`/`RefCell`).

use crate::error::InvocationError;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Property name that links a constructor to the prototype of its instances.
pub const PROTOTYPE_KEY: &str = "prototype";

/// Native callable body: receives the receiver (`this`) and the arguments.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value]) -> Result<Value, InvocationError>>;

/// A dynamically-typed value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Object),
}

impl Value {
    /// Wrap a native closure as a callable value.
    pub fn function<F>(body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, InvocationError> + 'static,
    {
        Value::Object(Object::function(body))
    }

    /// Runtime type tag, matching the conventional `typeof` labels.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(object) if object.is_callable() => "function",
            Value::Object(_) => "object",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Object(object) if object.is_callable())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Property lookup through the prototype chain. Primitives have no
    /// properties and always yield `Undefined`.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(object) => object.get(key),
            _ => Value::Undefined,
        }
    }
}

impl PartialEq for Value {
    /// Primitives compare by value, objects by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Object::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Number(value) => write!(f, "{value}"),
            Value::String(value) => write!(f, "{value:?}"),
            Value::Object(object) => fmt::Debug::fmt(object, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<&serde_json::Value> for Value {
    /// JSON data becomes plain objects and arrays; JSON has no callables.
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(*value),
            serde_json::Value::Number(number) => {
                Value::Number(number.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(value) => Value::String(value.clone()),
            serde_json::Value::Array(items) => {
                Value::Object(Object::array(items.iter().map(Value::from)))
            }
            serde_json::Value::Object(map) => {
                let object = Object::new();
                for (key, value) in map {
                    object.set(key, Value::from(value));
                }
                Value::Object(object)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}

#[derive(Clone)]
enum ObjectKind {
    Plain,
    Array(Vec<Value>),
    Function(NativeFn),
}

struct ObjectData {
    kind: ObjectKind,
    properties: IndexMap<String, Value>,
    prototype: Option<Object>,
}

/// Shared handle to a heap object. Clones alias the same object.
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    fn with_kind(kind: ObjectKind, prototype: Option<Object>) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            kind,
            properties: IndexMap::new(),
            prototype,
        })))
    }

    /// Empty plain object.
    pub fn new() -> Self {
        Self::with_kind(ObjectKind::Plain, None)
    }

    /// Plain object whose missing properties resolve through `prototype`.
    pub fn with_prototype(prototype: Object) -> Self {
        Self::with_kind(ObjectKind::Plain, Some(prototype))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::with_kind(ObjectKind::Array(items.into_iter().collect()), None)
    }

    pub fn function<F>(body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, InvocationError> + 'static,
    {
        Self::with_kind(ObjectKind::Function(Rc::new(body)), None)
    }

    /// Build a constructor whose `prototype` object holds `members`.
    ///
    /// Instances created with [`Object::instantiate`] see the members through
    /// their prototype link.
    pub fn class<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let prototype = Object::new();
        for (key, value) in members {
            prototype.set(key, value);
        }
        let constructor = Object::function(|_, _| Ok(Value::Undefined));
        constructor.set(PROTOTYPE_KEY, Value::Object(prototype));
        constructor
    }

    /// New instance linked to the constructor's `prototype` object, if any.
    pub fn instantiate(constructor: &Object) -> Object {
        match constructor.get(PROTOTYPE_KEY) {
            Value::Object(prototype) => Object::with_prototype(prototype),
            _ => Object::new(),
        }
    }

    pub fn ptr_eq(a: &Object, b: &Object) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Function(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Array(_))
    }

    pub fn prototype(&self) -> Option<Object> {
        self.0.borrow().prototype.clone()
    }

    /// Own property, without consulting the prototype chain.
    pub fn own(&self, key: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(value) = data.properties.get(key) {
            return Some(value.clone());
        }
        match &data.kind {
            ObjectKind::Array(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned()),
            _ => None,
        }
    }

    /// Property lookup through the prototype chain.
    pub fn get(&self, key: &str) -> Value {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(value) = object.own(key) {
                return value;
            }
            current = object.prototype();
        }
        Value::Undefined
    }

    /// Assign an own property, shadowing anything on the prototype chain.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().properties.insert(key.into(), value);
    }

    /// Own property names in assignment order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Own `(name, value)` pairs in assignment order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Invoke this object as a function with `receiver` bound as `this`.
    ///
    /// The body runs with no outstanding borrow of the object, so it may
    /// freely read or mutate its receiver.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value, InvocationError> {
        let body = match &self.0.borrow().kind {
            ObjectKind::Function(body) => Rc::clone(body),
            _ => {
                return Err(InvocationError::NotCallable {
                    method: "value".to_string(),
                    found: "object",
                });
            }
        };
        body(receiver, args)
    }
}

impl Default for Object {
    fn default() -> Self {
        Object::new()
    }
}

impl fmt::Debug for Object {
    // Properties may reference the object itself; only names are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        let kind = match &data.kind {
            ObjectKind::Plain => "object",
            ObjectKind::Array(_) => "array",
            ObjectKind::Function(_) => "function",
        };
        f.debug_struct("Object")
            .field("kind", &kind)
            .field("keys", &data.properties.keys().collect::<Vec<_>>())
            .field("has_prototype", &data.prototype.is_some())
            .finish()
    }
}

thread_local! {
    static NO_OP: Object = Object::function(|_, _| Ok(Value::Undefined));
}

/// The shared no-op callable used to fill gaps. Every call on the same thread
/// returns the same object.
pub fn no_op() -> Object {
    NO_OP.with(Object::clone)
}
