//! Conversion from parsed JSON documents
//!
//! JSON objects become plain objects (member order preserved as parsed), arrays
//! become arrays, and numbers become `f64`.

use super::{Object, ObjectKind, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(members) => Value::from_object(Object::with_props(
                ObjectKind::Plain,
                members.into_iter().map(|(k, v)| (k, Value::from(v))),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_becomes_plain_object() {
        let value = Value::from(json!({"a": 1, "b": [true, null], "c": "x"}));
        let Value::Object(obj) = value else {
            panic!("expected object");
        };
        let obj = obj.borrow();
        assert!(matches!(obj.kind, ObjectKind::Plain));
        assert_eq!(obj.props.len(), 3);
        assert!(matches!(obj.get("a"), Some(Value::Number(n)) if *n == 1.0));
        assert!(matches!(obj.get("b"), Some(Value::Object(_))));
    }
}
