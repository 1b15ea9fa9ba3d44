//! Resolved value tree
//!
//! A [`Value`] is the evaluated form of an environment property: a tagged
//! payload plus the metadata the service attaches to every node (secret and
//! unknown flags, provenance trace). Trees are built once, when the service
//! response is decoded, and are read-only afterwards.

mod object;
pub mod trace;
mod wire;

pub use object::ObjectMap;
pub use trace::{Pos, Range, Trace};
pub use wire::{deserialize_detailed_members, parse_plain};

use serde_json::Number;

/// Payload of a single tree node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueKind {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ObjectMap),
}

impl ValueKind {
    /// Short type name used in log fields and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool(_) => "boolean",
            ValueKind::Number(_) => "number",
            ValueKind::String(_) => "string",
            ValueKind::Array(_) => "array",
            ValueKind::Object(_) => "object",
        }
    }
}

/// A node of the resolved value tree
///
/// `Value::default()` is the canonical undefined value: null payload, no
/// flags, no trace. It is what a property path lookup miss renders as.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    kind: ValueKind,
    secret: bool,
    unknown: bool,
    trace: Option<Trace>,
}

impl Value {
    /// Create a value with the given payload and no metadata
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// The canonical undefined value
    pub fn undefined() -> Self {
        Self::default()
    }

    pub fn null() -> Self {
        Self::new(ValueKind::Null)
    }

    pub fn bool(b: bool) -> Self {
        Self::new(ValueKind::Bool(b))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::new(ValueKind::String(s.into()))
    }

    pub fn number(n: impl Into<Number>) -> Self {
        Self::new(ValueKind::Number(n.into()))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::new(ValueKind::Array(items.into_iter().collect()))
    }

    pub fn object(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::new(ValueKind::Object(entries.into_iter().collect()))
    }

    /// Mark the value as secret
    pub fn with_secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    /// Mark the value as unknown (not resolvable at open time)
    pub fn with_unknown(mut self, unknown: bool) -> Self {
        self.unknown = unknown;
        self
    }

    /// Attach provenance
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn is_unknown(&self) -> bool {
        self.unknown
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// True for the canonical undefined value
    pub fn is_undefined(&self) -> bool {
        *self == Self::default()
    }

    /// String payload, if this node is a string
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    /// Sequence payload, if this node is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping payload, if this node is an object
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match &self.kind {
            ValueKind::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Child by key; `None` when missing or when this node is not an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Child by index; `None` when out of range or when this node is not an array
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }
}

impl From<ValueKind> for Value {
    fn from(kind: ValueKind) -> Self {
        Value::new(kind)
    }
}
