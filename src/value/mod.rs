//! Inspectable value model
//!
//! The inspector walks [`Value`]s: a small dynamic value type able to express
//! everything the tree view distinguishes. Scalars are stored inline, while every
//! compound value lives behind an [`ObjectRef`] (`Rc<RefCell<Object>>`) so that
//! the same allocation can be reachable from several places, including itself.
//!
//! # Identity
//!
//! Two `Value::Object`s are the *same* value when they share an allocation.
//! [`Value::identity`] exposes that address; the cycle detector keys on it
//! without holding a strong reference.
//!
//! # Building cyclic values
//!
//! ```
//! use xray::value::Value;
//!
//! let root = Value::object([("x", Value::from(1))]);
//! if let Value::Object(obj) = &root {
//!     obj.borrow_mut().set("self", root.clone());
//! }
//! ```
//!
//! Cyclic `Rc` graphs are never freed on their own; call [`Object::clear`] on
//! one member of the cycle when the value is no longer needed.

pub mod json;
pub mod object;

pub use object::{BufferKind, ClassDef, FunctionKind, HostObject, Object, ObjectKind};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Shared handle to a compound value
pub type ObjectRef = Rc<RefCell<Object>>;

/// Address of a compound value's allocation, stable for the allocation's lifetime
pub type Identity = usize;

/// Runtime values the inspector understands
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Symbol(Option<String>), // description
    String(String),
    Object(ObjectRef),
}

/// Failure to produce the text form of a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("text conversion failed: {0}")]
    Failed(String),
}

impl Value {
    /// Wrap an [`Object`] into a fresh allocation
    pub fn from_object(object: Object) -> Self {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    /// Plain object with the given members, in order
    pub fn object<K, I>(members: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::from_object(Object::with_props(ObjectKind::Plain, members))
    }

    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::from_object(Object::new(ObjectKind::Array(items.into_iter().collect())))
    }

    pub fn map<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Self::from_object(Object::new(ObjectKind::Map(entries.into_iter().collect())))
    }

    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::from_object(Object::new(ObjectKind::Set(items.into_iter().collect())))
    }

    /// Instance of a named class with the given own properties
    pub fn instance<K, I>(class: Rc<ClassDef>, props: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::from_object(Object::with_props(ObjectKind::Instance(class), props))
    }

    pub fn function(kind: FunctionKind, name: Option<&str>) -> Self {
        Self::from_object(Object::new(ObjectKind::Function {
            kind,
            name: name.map(str::to_string),
        }))
    }

    pub fn date(text: impl Into<String>) -> Self {
        Self::from_object(Object::new(ObjectKind::Date(text.into())))
    }

    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self::from_object(Object::new(ObjectKind::RegExp {
            source: source.into(),
            flags: flags.into(),
        }))
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_object(Object::new(ObjectKind::Error {
            name: name.into(),
            message: message.into(),
        }))
    }

    pub fn buffer(kind: BufferKind, bytes: Vec<u8>) -> Self {
        Self::from_object(Object::new(ObjectKind::Buffer { kind, bytes }))
    }

    pub fn host(host: impl HostObject + 'static) -> Self {
        Self::from_object(Object::new(ObjectKind::Host(Box::new(host))))
    }

    /// Allocation address of a compound value, `None` for scalars
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Object(obj) => Some(Rc::as_ptr(obj) as *const () as Identity),
            _ => None,
        }
    }

    /// Text form of the value, as used for map keys and opaque values
    pub fn to_text(&self) -> Result<String, ConversionError> {
        match self {
            Value::Undefined => Ok("undefined".to_string()),
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(format_number(*n)),
            Value::BigInt(n) => Ok(n.to_string()),
            Value::Symbol(desc) => Ok(format!("Symbol({})", desc.as_deref().unwrap_or(""))),
            Value::String(s) => Ok(s.clone()),
            Value::Object(obj) => obj.borrow().to_text(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::BigInt(n) => write!(f, "BigInt({n})"),
            Value::Symbol(desc) => write!(f, "Symbol({desc:?})"),
            Value::String(s) => write!(f, "String({s:?})"),
            // Shallow: objects may contain themselves
            Value::Object(obj) => match obj.try_borrow() {
                Ok(o) => write!(f, "Object({} @ {:p})", o.kind.tag(), Rc::as_ptr(obj)),
                Err(_) => write!(f, "Object(<borrowed> @ {:p})", Rc::as_ptr(obj)),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

/// Format a number the way a script engine prints it (`1` rather than `1.0`)
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_identity_follows_allocation() {
        let a = Value::object([("x", Value::from(1))]);
        let alias = a.clone();
        let b = Value::object([("x", Value::from(1))]);

        assert_eq!(a.identity(), alias.identity());
        assert_ne!(a.identity(), b.identity());
        assert_eq!(Value::from(1).identity(), None);
    }

    #[test]
    fn test_to_text_of_compounds() {
        let arr = Value::array([Value::from(1), Value::from("a"), Value::Null]);
        assert_eq!(arr.to_text().unwrap(), "1,a,");
        assert_eq!(Value::object::<&str, _>([]).to_text().unwrap(), "[object Object]");
        assert_eq!(Value::regexp("a+", "g").to_text().unwrap(), "/a+/g");
    }

    #[test]
    fn test_debug_is_shallow_for_cycles() {
        let root = Value::object::<&str, _>([]);
        if let Value::Object(obj) = &root {
            obj.borrow_mut().set("self", root.clone());
        }
        let printed = format!("{:?}", root);
        assert!(printed.starts_with("Object(Object @"));
        if let Value::Object(obj) = &root {
            obj.borrow_mut().clear();
        }
    }
}
