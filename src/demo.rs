//! Sample value exercising every display category
//!
//! Used by `xray --demo`. The returned value contains cycles; it lives for the
//! whole program, so the leak is irrelevant there.

use crate::value::{BufferKind, ClassDef, ConversionError, FunctionKind, HostObject, Object, ObjectKind, Value};
use std::rc::Rc;

#[derive(Debug)]
struct Socket {
    fd: i32,
}

impl HostObject for Socket {
    fn tag(&self) -> Option<&str> {
        Some("Socket")
    }

    fn to_text(&self) -> Result<String, ConversionError> {
        Ok(format!("socket fd={}", self.fd))
    }
}

#[derive(Debug)]
struct Revoked;

impl HostObject for Revoked {
    fn to_text(&self) -> Result<String, ConversionError> {
        Err(ConversionError::Failed("proxy has been revoked".to_string()))
    }
}

pub fn sample() -> Value {
    let entity = Rc::new(
        ClassDef::new("Entity")
            .with_method("save")
            .with_method("toJSON"),
    );
    let user_class = Rc::new(
        ClassDef::new("User")
            .with_method("greet")
            .with_method("save")
            .extends(entity),
    );
    let user = Value::instance(
        user_class,
        [("name", Value::from("Ada")), ("age", Value::from(36))],
    );

    let handler = Value::function(FunctionKind::Function, Some("onChange"));
    if let Value::Object(obj) = &handler {
        obj.borrow_mut().set("debounce", Value::from(250));
    }

    let tags = Value::set([Value::from("admin"), Value::from("ops"), user.clone()]);
    let lookup = Value::map([
        (Value::from("ada"), user.clone()),
        (Value::from(42), Value::from("answer")),
    ]);
    if let Value::Object(obj) = &lookup {
        obj.borrow_mut().insert_entry(Value::from("index"), lookup.clone());
    }

    let root = Value::object([
        ("title", Value::from("XRay demo")),
        ("empty", Value::from("")),
        ("count", Value::from(3)),
        ("ratio", Value::from(0.75)),
        ("enabled", Value::from(true)),
        ("missing", Value::Null),
        ("unset", Value::Undefined),
        ("big", Value::BigInt(9_007_199_254_740_993)),
        ("sym", Value::Symbol(Some("token".to_string()))),
        ("list", Value::array([Value::from(1), Value::from(2), Value::array([])])),
        ("user", user.clone()),
        ("owner", user),
        ("tags", tags),
        ("lookup", lookup),
        ("onChange", handler),
        ("anon", Value::function(FunctionKind::GeneratorFunction, None)),
        ("created", Value::date("Tue Mar 05 2024 10:00:00 GMT+0000")),
        ("pattern", Value::regexp("^x+$", "gi")),
        ("failure", Value::error("TypeError", "x is not a function")),
        ("pending", Value::from_object(Object::new(ObjectKind::Promise))),
        ("cache", Value::from_object(Object::new(ObjectKind::WeakMap))),
        ("pixels", Value::buffer(BufferKind::Uint8Clamped, vec![0, 128, 255])),
        ("samples", Value::buffer(BufferKind::Float64, 0.5f64.to_le_bytes().to_vec())),
        (
            "storage",
            Value::from_object(Object::with_props(
                ObjectKind::Storage,
                [("theme", Value::from("dark"))],
            )),
        ),
        ("socket", Value::host(Socket { fd: 7 })),
        ("revoked", Value::host(Revoked)),
        ("emptyObject", Value::object::<&str, _>([])),
        ("emptyMap", Value::map([])),
        ("emptySet", Value::set([])),
    ]);

    if let Value::Object(obj) = &root {
        obj.borrow_mut().set("self", root.clone());
    }
    root
}
