// End-to-end tests for the inspector

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use xray::config::InspectorConfig;
use xray::inspector::{Category, Console, Inspector, NodeBody};
use xray::load::{load_config, load_value, LoadError};
use xray::value::Value;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("xray-{}-{}", std::process::id(), name));
    fs::write(&path, contents).expect("Failed to write temp file");
    path
}

fn with_self_reference() -> Value {
    let root = Value::object([
        ("x", Value::from(1)),
        ("y", Value::array([Value::from(1), Value::from(2)])),
    ]);
    if let Value::Object(obj) = &root {
        obj.borrow_mut().set("self", root.clone());
    }
    root
}

#[test]
fn test_self_reference_terminates() {
    let root = with_self_reference();
    let inspector = Inspector::new(&InspectorConfig::default(), &root);

    let view = inspector.render(&root);
    let tree = view.root.expect("Tree missing");

    // root, x, y, y[0], y[1]; the circular marker is not counted
    assert_eq!(view.stats.nodes, 5);
    assert!(tree.find("$.self").unwrap().is_circular());
    assert_eq!(tree.find("$.y[1]").unwrap().body, NodeBody::Leaf("2".to_string()));
}

#[test]
fn test_passes_are_independent() {
    let root = with_self_reference();
    let inspector = Inspector::new(&InspectorConfig::default(), &root);

    let first = inspector.render(&root);
    let second = inspector.render(&root);
    assert_eq!(first.stats.nodes, second.stats.nodes);
    assert_eq!(first.root, second.root);
}

fn nested_abc() -> Value {
    Value::object([(
        "a",
        Value::object([("b", Value::object([("c", Value::from(1))]))]),
    )])
}

#[test]
fn test_collapsed_row_counts_but_prunes_below() {
    let root = nested_abc();
    let mut inspector = Inspector::new(&InspectorConfig::default(), &root);
    assert_eq!(inspector.render(&root).stats.nodes, 4);

    // root and the collapsed `a` row
    assert!(inspector.toggle_collapse("$.a"));
    let view = inspector.render(&root);
    assert_eq!(view.stats.nodes, 2);

    let row = view.root.as_ref().unwrap().find_row("$.a").unwrap();
    assert!(row.collapsed);
    assert!(row.value.is_none());
    assert!(view.root.as_ref().unwrap().find_row("$.a.b").is_none());

    assert!(!inspector.toggle_collapse("$.a"));
    assert_eq!(inspector.render(&root).stats.nodes, 4);
}

#[test]
fn test_nested_collapse() {
    let root = nested_abc();
    let mut inspector = Inspector::new(&InspectorConfig::default(), &root);

    inspector.toggle_collapse("$.a.b");
    let view = inspector.render(&root);
    assert_eq!(view.stats.nodes, 3);

    let row = view.root.as_ref().unwrap().find_row("$.a.b").unwrap();
    assert!(row.collapsed);
    assert!(row.value.is_none());
}

#[test]
fn test_cycle_through_map_entry() {
    let map = Value::map([(Value::from("n"), Value::from(1))]);
    if let Value::Object(obj) = &map {
        obj.borrow_mut().insert_entry(Value::from("k"), map.clone());
    }
    let root = Value::object([("m", map)]);
    let inspector = Inspector::new(&InspectorConfig::default(), &root);

    let view = inspector.render(&root);
    let tree = view.root.expect("Tree missing");

    // root, m, m.n; the circular entry is not counted
    assert_eq!(view.stats.nodes, 3);
    assert!(tree.find("$.m.k").unwrap().is_circular());
    assert_eq!(tree.find("$.m.n").unwrap().body, NodeBody::Leaf("1".to_string()));
}

#[test]
fn test_collapse_all_from_json_config() {
    let config: InspectorConfig =
        serde_json::from_str(r#"{ "collapse": true, "title": "State", "count": true }"#)
            .expect("Config parse failed");
    let root = Value::object([
        ("a", Value::object([("b", Value::from(1))])),
        ("c", Value::from(2)),
    ]);
    let mut inspector = Inspector::new(&config, &root);

    let view = inspector.render(&root);
    assert_eq!(view.title.as_deref(), Some("State"));
    // root plus the two collapsed top-level rows
    assert_eq!(view.stats.nodes, 3);

    // Toggling in reversed mode expands
    assert!(!inspector.toggle_collapse("$.a"));
    let view = inspector.render(&root);
    assert_eq!(view.stats.nodes, 4);
    assert!(view.root.unwrap().find_row("$.a.b").unwrap().collapsed);
}

#[test]
fn test_collapse_except_reports_conflict() {
    let config: InspectorConfig =
        serde_json::from_str(r#"{ "collapse": true, "collapseExcept": ["a"] }"#).unwrap();
    let root = Value::object([("a", Value::from(1))]);
    let console = Rc::new(Console::new());
    let _inspector = Inspector::with_sink(&config, &root, console.clone());

    let output = console.get_output();
    assert_eq!(output.len(), 1);
    assert!(output[0].text.contains("collapseExcept"));
}

#[test]
fn test_load_json_document() {
    let path = temp_file(
        "doc.json",
        r#"{ "name": "xray", "tags": [], "nested": { "ok": true, "n": null } }"#,
    );
    let root = load_value(&path).expect("Load failed");
    fs::remove_file(&path).ok();

    let inspector = Inspector::new(&InspectorConfig::default(), &root);
    let tree = inspector.render(&root).root.unwrap();

    assert_eq!(tree.category, Category::PlainObject);
    assert!(tree.find("$.tags").unwrap().is_empty_marker());
    assert_eq!(tree.find("$.nested.ok").unwrap().body, NodeBody::Leaf("true".to_string()));
    assert_eq!(tree.find("$.nested.n").unwrap().category, Category::Null);

    let keys: Vec<_> = tree.rows().iter().filter_map(|r| r.key.clone()).collect();
    assert_eq!(keys, vec!["name", "tags", "nested"]);
}

#[test]
fn test_load_config_file() {
    let path = temp_file("config.json", r#"{ "collapse": ["a"], "header": false }"#);
    let config = load_config(&path).expect("Load failed");
    fs::remove_file(&path).ok();

    let root = Value::object([
        ("a", Value::object([("b", Value::from(1))])),
        ("c", Value::from(2)),
    ]);
    let view = Inspector::new(&config, &root).render(&root);
    assert_eq!(view.title, None);
    assert_eq!(view.stats.nodes, 3);
    assert!(view.root.unwrap().find_row("$.a").unwrap().collapsed);
}

#[test]
fn test_load_errors() {
    let missing = std::env::temp_dir().join("xray-definitely-missing.json");
    assert!(matches!(load_value(&missing), Err(LoadError::Io { .. })));

    let path = temp_file("bad.json", "{ not json");
    let result = load_value(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(LoadError::Json { .. })));
}

#[test]
fn test_demo_sample_renders() {
    let root = xray::demo::sample();
    let console = Rc::new(Console::new());
    let inspector = Inspector::with_sink(&InspectorConfig::default(), &root, console.clone());

    let view = inspector.render(&root);
    assert!(view.stats.nodes > 10);
    assert!(console.is_empty());
}
