//! Type classification
//!
//! [`classify`] maps any [`Value`] onto the closed [`Category`] set the tree
//! builder dispatches on. It is pure and total: anything without a recognized
//! tag lands in [`Category::Unknown`].

use crate::value::{BufferKind, ObjectKind, Value};
use std::fmt;

/// Whether a string is empty, which renders as a distinct marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    Empty,
    NonEmpty,
}

/// Display category of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Null,
    Undefined,
    Boolean,
    Number,
    BigInt,
    Symbol,
    String(StringKind),
    Function,
    PlainObject,
    ClassInstance,
    Array,
    Date,
    RegExp,
    Error,
    Promise,
    Map,
    Set,
    WeakMap,
    WeakSet,
    TypedBuffer(BufferKind),
    StorageLike,
    MathLike,
    Unknown,
}

impl Category {
    /// Compound categories go through cycle detection and may recurse
    pub fn is_compound(self) -> bool {
        !matches!(
            self,
            Category::Null
                | Category::Undefined
                | Category::Boolean
                | Category::Number
                | Category::BigInt
                | Category::Symbol
                | Category::String(_)
        )
    }

    /// Category named by an internal tag such as `Date` or `Uint8Array`.
    ///
    /// Only tags that render without structural access are recognized, so a
    /// host object claiming to be an `Array` still classifies as unknown.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let category = match tag {
            "Date" => Category::Date,
            "RegExp" => Category::RegExp,
            "Error" => Category::Error,
            "Promise" => Category::Promise,
            "WeakMap" => Category::WeakMap,
            "WeakSet" => Category::WeakSet,
            "Storage" => Category::StorageLike,
            "Math" => Category::MathLike,
            other => Category::TypedBuffer(BufferKind::from_name(other)?),
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Null => "null",
            Category::Undefined => "undefined",
            Category::Boolean => "boolean",
            Category::Number => "number",
            Category::BigInt => "bigint",
            Category::Symbol => "symbol",
            Category::String(_) => "string",
            Category::Function => "function",
            Category::PlainObject => "object",
            Category::ClassInstance => "instance",
            Category::Array => "array",
            Category::Date => "Date",
            Category::RegExp => "RegExp",
            Category::Error => "Error",
            Category::Promise => "Promise",
            Category::Map => "Map",
            Category::Set => "Set",
            Category::WeakMap => "WeakMap",
            Category::WeakSet => "WeakSet",
            Category::TypedBuffer(kind) => kind.name(),
            Category::StorageLike => "Storage",
            Category::MathLike => "Math",
            Category::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classify a value
pub fn classify(value: &Value) -> Category {
    match value {
        Value::Null => Category::Null,
        Value::Undefined => Category::Undefined,
        Value::Bool(_) => Category::Boolean,
        Value::Number(_) => Category::Number,
        Value::BigInt(_) => Category::BigInt,
        Value::Symbol(_) => Category::Symbol,
        Value::String(s) if s.is_empty() => Category::String(StringKind::Empty),
        Value::String(_) => Category::String(StringKind::NonEmpty),
        Value::Object(obj) => classify_kind(&obj.borrow().kind),
    }
}

fn classify_kind(kind: &ObjectKind) -> Category {
    match kind {
        ObjectKind::Plain => Category::PlainObject,
        ObjectKind::Array(_) => Category::Array,
        ObjectKind::Instance(_) => Category::ClassInstance,
        ObjectKind::Function { .. } => Category::Function,
        ObjectKind::Date(_) => Category::Date,
        ObjectKind::RegExp { .. } => Category::RegExp,
        ObjectKind::Error { .. } => Category::Error,
        ObjectKind::Promise => Category::Promise,
        ObjectKind::Map(_) => Category::Map,
        ObjectKind::Set(_) => Category::Set,
        ObjectKind::WeakMap => Category::WeakMap,
        ObjectKind::WeakSet => Category::WeakSet,
        ObjectKind::Buffer { kind, .. } => Category::TypedBuffer(*kind),
        ObjectKind::Storage => Category::StorageLike,
        ObjectKind::Math => Category::MathLike,
        ObjectKind::Host(host) => host
            .tag()
            .and_then(Category::from_tag)
            .unwrap_or(Category::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ClassDef, ConversionError, FunctionKind, HostObject};
    use std::rc::Rc;

    #[derive(Debug)]
    struct Tagged(Option<&'static str>);

    impl HostObject for Tagged {
        fn tag(&self) -> Option<&str> {
            self.0
        }

        fn to_text(&self) -> Result<String, ConversionError> {
            Ok("tagged".to_string())
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(classify(&Value::Null), Category::Null);
        assert_eq!(classify(&Value::Undefined), Category::Undefined);
        assert_eq!(classify(&Value::from(true)), Category::Boolean);
        assert_eq!(classify(&Value::from(1.5)), Category::Number);
        assert_eq!(classify(&Value::BigInt(7)), Category::BigInt);
        assert_eq!(classify(&Value::Symbol(None)), Category::Symbol);
        assert_eq!(classify(&Value::from("")), Category::String(StringKind::Empty));
        assert_eq!(
            classify(&Value::from("x")),
            Category::String(StringKind::NonEmpty)
        );
    }

    #[test]
    fn test_plain_object_vs_instance() {
        let plain = Value::object([("a", Value::from(1))]);
        let class = Rc::new(ClassDef::new("Point"));
        let instance = Value::instance(class, [("x", Value::from(1))]);

        assert_eq!(classify(&plain), Category::PlainObject);
        assert_eq!(classify(&instance), Category::ClassInstance);
    }

    #[test]
    fn test_compound_kinds() {
        assert_eq!(classify(&Value::array([])), Category::Array);
        assert_eq!(classify(&Value::map([])), Category::Map);
        assert_eq!(classify(&Value::set([])), Category::Set);
        assert_eq!(
            classify(&Value::function(FunctionKind::AsyncFunction, None)),
            Category::Function
        );
        assert_eq!(classify(&Value::date("Thu Jan 01 1970")), Category::Date);
        assert_eq!(classify(&Value::regexp("x", "")), Category::RegExp);
        assert_eq!(classify(&Value::error("TypeError", "bad")), Category::Error);
        assert_eq!(
            classify(&Value::buffer(BufferKind::Float32, vec![0; 8])),
            Category::TypedBuffer(BufferKind::Float32)
        );
    }

    #[test]
    fn test_host_objects_use_their_tag() {
        assert_eq!(classify(&Value::host(Tagged(Some("Date")))), Category::Date);
        assert_eq!(
            classify(&Value::host(Tagged(Some("Storage")))),
            Category::StorageLike
        );
        assert_eq!(
            classify(&Value::host(Tagged(Some("BigUint64Array")))),
            Category::TypedBuffer(BufferKind::BigUint64)
        );
        assert_eq!(classify(&Value::host(Tagged(Some("Array")))), Category::Unknown);
        assert_eq!(classify(&Value::host(Tagged(None))), Category::Unknown);
    }

    #[test]
    fn test_compoundness() {
        assert!(!Category::String(StringKind::NonEmpty).is_compound());
        assert!(!Category::Null.is_compound());
        assert!(Category::Set.is_compound());
        assert!(Category::Unknown.is_compound());
    }
}
