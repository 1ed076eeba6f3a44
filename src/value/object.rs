//! Compound values: objects, arrays, collections, classes and host objects

use super::{format_number, ConversionError, Identity, Value};
use rustc_hash::FxHashSet;
use std::fmt;
use std::rc::Rc;

/// Flavour of a callable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    AsyncFunction,
    GeneratorFunction,
    AsyncGeneratorFunction,
}

impl FunctionKind {
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Function => "Function",
            FunctionKind::AsyncFunction => "AsyncFunction",
            FunctionKind::GeneratorFunction => "GeneratorFunction",
            FunctionKind::AsyncGeneratorFunction => "AsyncGeneratorFunction",
        }
    }
}

/// Concrete subtype of a typed numeric buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
    Raw, // untyped ArrayBuffer
}

impl BufferKind {
    pub const ALL: [BufferKind; 12] = [
        BufferKind::Int8,
        BufferKind::Uint8,
        BufferKind::Uint8Clamped,
        BufferKind::Int16,
        BufferKind::Uint16,
        BufferKind::Int32,
        BufferKind::Uint32,
        BufferKind::Float32,
        BufferKind::Float64,
        BufferKind::BigInt64,
        BufferKind::BigUint64,
        BufferKind::Raw,
    ];

    /// Display name, e.g. `Uint8Array`
    pub fn name(self) -> &'static str {
        match self {
            BufferKind::Int8 => "Int8Array",
            BufferKind::Uint8 => "Uint8Array",
            BufferKind::Uint8Clamped => "Uint8ClampedArray",
            BufferKind::Int16 => "Int16Array",
            BufferKind::Uint16 => "Uint16Array",
            BufferKind::Int32 => "Int32Array",
            BufferKind::Uint32 => "Uint32Array",
            BufferKind::Float32 => "Float32Array",
            BufferKind::Float64 => "Float64Array",
            BufferKind::BigInt64 => "BigInt64Array",
            BufferKind::BigUint64 => "BigUint64Array",
            BufferKind::Raw => "ArrayBuffer",
        }
    }

    /// Size of one element in bytes
    pub fn element_size(self) -> usize {
        match self {
            BufferKind::Int8 | BufferKind::Uint8 | BufferKind::Uint8Clamped | BufferKind::Raw => 1,
            BufferKind::Int16 | BufferKind::Uint16 => 2,
            BufferKind::Int32 | BufferKind::Uint32 | BufferKind::Float32 => 4,
            BufferKind::Float64 | BufferKind::BigInt64 | BufferKind::BigUint64 => 8,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Decode little-endian elements; trailing bytes that do not fill an element are dropped
    pub fn decode(self, bytes: &[u8]) -> Vec<String> {
        bytes
            .chunks_exact(self.element_size())
            .map(|c| match self {
                BufferKind::Int8 => (c[0] as i8).to_string(),
                BufferKind::Uint8 | BufferKind::Uint8Clamped | BufferKind::Raw => c[0].to_string(),
                BufferKind::Int16 => i16::from_le_bytes(le(c)).to_string(),
                BufferKind::Uint16 => u16::from_le_bytes(le(c)).to_string(),
                BufferKind::Int32 => i32::from_le_bytes(le(c)).to_string(),
                BufferKind::Uint32 => u32::from_le_bytes(le(c)).to_string(),
                BufferKind::Float32 => format_number(f32::from_le_bytes(le(c)) as f64),
                BufferKind::Float64 => format_number(f64::from_le_bytes(le(c))),
                BufferKind::BigInt64 => i64::from_le_bytes(le(c)).to_string(),
                BufferKind::BigUint64 => u64::from_le_bytes(le(c)).to_string(),
            })
            .collect()
    }
}

fn le<const N: usize>(chunk: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(chunk);
    out
}

/// A named custom type: the members declared at one level plus its parent.
///
/// `parent == None` means the next level up is the generic base object type.
#[derive(Debug, Default)]
pub struct ClassDef {
    pub name: String,
    pub members: Vec<(String, Value)>,
    pub parent: Option<Rc<ClassDef>>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef {
            name: name.into(),
            members: Vec::new(),
            parent: None,
        }
    }

    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.push((name.into(), value));
        self
    }

    /// Declare a plain method under `name`
    pub fn with_method(self, name: &str) -> Self {
        let method = Value::function(FunctionKind::Function, Some(name));
        self.with_member(name, method)
    }

    pub fn extends(mut self, parent: Rc<ClassDef>) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// An opaque value owned by a foreign object model
pub trait HostObject: fmt::Debug {
    /// Internal type tag, e.g. `Date` or `Storage`; `None` when there is none
    fn tag(&self) -> Option<&str> {
        None
    }

    /// Best-effort text form
    fn to_text(&self) -> Result<String, ConversionError>;
}

/// What a compound value is
pub enum ObjectKind {
    Plain,
    Array(Vec<Value>),
    Instance(Rc<ClassDef>),
    Function {
        kind: FunctionKind,
        name: Option<String>,
    },
    Date(String), // canonical text form
    RegExp {
        source: String,
        flags: String,
    },
    Error {
        name: String,
        message: String,
    },
    Promise,
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    WeakMap,
    WeakSet,
    Buffer {
        kind: BufferKind,
        bytes: Vec<u8>,
    },
    Storage,
    Math,
    Host(Box<dyn HostObject>),
}

impl ObjectKind {
    /// Internal tag as a script engine would report it
    pub fn tag(&self) -> &str {
        match self {
            ObjectKind::Plain | ObjectKind::Instance(_) => "Object",
            ObjectKind::Array(_) => "Array",
            ObjectKind::Function { kind, .. } => kind.name(),
            ObjectKind::Date(_) => "Date",
            ObjectKind::RegExp { .. } => "RegExp",
            ObjectKind::Error { .. } => "Error",
            ObjectKind::Promise => "Promise",
            ObjectKind::Map(_) => "Map",
            ObjectKind::Set(_) => "Set",
            ObjectKind::WeakMap => "WeakMap",
            ObjectKind::WeakSet => "WeakSet",
            ObjectKind::Buffer { kind, .. } => kind.name(),
            ObjectKind::Storage => "Storage",
            ObjectKind::Math => "Math",
            ObjectKind::Host(host) => host.tag().unwrap_or("Unknown"),
        }
    }
}

/// A compound value: its kind plus its own properties, in insertion order
pub struct Object {
    pub kind: ObjectKind,
    pub props: Vec<(String, Value)>,
}

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Object {
            kind,
            props: Vec::new(),
        }
    }

    pub fn with_props<K, I>(kind: ObjectKind, props: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Object {
            kind,
            props: props.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Own property lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Set an own property, replacing an existing one in place
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.props.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.props.push((key, value)),
        }
    }

    /// Append an element to an array or set. Returns false for other kinds.
    pub fn push(&mut self, value: Value) -> bool {
        match &mut self.kind {
            ObjectKind::Array(items) | ObjectKind::Set(items) => {
                items.push(value);
                true
            }
            _ => false,
        }
    }

    /// Append a `key => value` entry to a map. Returns false for other kinds.
    pub fn insert_entry(&mut self, key: Value, value: Value) -> bool {
        match &mut self.kind {
            ObjectKind::Map(entries) => {
                entries.push((key, value));
                true
            }
            _ => false,
        }
    }

    /// Drop all properties and elements, breaking any reference cycle through this object
    pub fn clear(&mut self) {
        self.props.clear();
        match &mut self.kind {
            ObjectKind::Array(items) | ObjectKind::Set(items) => items.clear(),
            ObjectKind::Map(entries) => entries.clear(),
            _ => {}
        }
    }

    pub fn to_text(&self) -> Result<String, ConversionError> {
        let mut seen = FxHashSet::default();
        self.text_form(&mut seen)
    }

    fn text_form(&self, seen: &mut FxHashSet<Identity>) -> Result<String, ConversionError> {
        match &self.kind {
            ObjectKind::Plain | ObjectKind::Instance(_) | ObjectKind::Storage => {
                Ok("[object Object]".to_string())
            }
            ObjectKind::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(joined_text(item, seen)?);
                }
                Ok(parts.join(","))
            }
            ObjectKind::Function { kind, name } => Ok(format!(
                "{} {}",
                kind.name(),
                name.as_deref().unwrap_or("anonymous")
            )),
            ObjectKind::Date(text) => Ok(text.clone()),
            ObjectKind::RegExp { source, flags } => Ok(format!("/{}/{}", source, flags)),
            ObjectKind::Error { name, message } => {
                if message.is_empty() {
                    Ok(name.clone())
                } else {
                    Ok(format!("{}: {}", name, message))
                }
            }
            ObjectKind::Host(host) => host.to_text(),
            other => Ok(format!("[object {}]", other.tag())),
        }
    }
}

/// Element text inside a joined array: nullish and cyclic elements are blank
fn joined_text(value: &Value, seen: &mut FxHashSet<Identity>) -> Result<String, ConversionError> {
    match value {
        Value::Undefined | Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(format_number(*n)),
        Value::Object(obj) => {
            let id = value.identity().unwrap_or_default();
            if !seen.insert(id) {
                return Ok(String::new());
            }
            let text = obj.borrow().text_form(seen);
            seen.remove(&id);
            text
        }
        other => other.to_text(),
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.props.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Object")
            .field("kind", &self.kind.tag())
            .field("props", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_decode() {
        assert_eq!(BufferKind::Int8.decode(&[0xff, 1]), ["-1", "1"]);
        assert_eq!(BufferKind::Uint16.decode(&[1, 1, 9]), ["257"]);
        assert_eq!(BufferKind::Float32.decode(&1.5f32.to_le_bytes()), ["1.5"]);
        assert_eq!(BufferKind::from_name("Uint8ClampedArray"), Some(BufferKind::Uint8Clamped));
        assert_eq!(BufferKind::from_name("Array"), None);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut obj = Object::with_props(ObjectKind::Plain, [("a", Value::from(1)), ("b", Value::from(2))]);
        obj.set("a", Value::from(3));
        let keys: Vec<&str> = obj.props.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(matches!(obj.get("a"), Some(Value::Number(n)) if *n == 3.0));
    }

    #[test]
    fn test_error_text() {
        let err = Object::new(ObjectKind::Error {
            name: "RangeError".to_string(),
            message: "too big".to_string(),
        });
        assert_eq!(err.to_text().unwrap(), "RangeError: too big");
    }
}
