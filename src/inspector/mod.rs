//! The inspection engine
//!
//! - [`classify`]: value -> display [`Category`]
//! - [`cycle`]: per-pass circular reference detection by path lineage
//! - [`collapse`]: persistent per-path collapse state
//! - [`members`]: instance and callable member collection
//! - [`tree`]: the recursive builder producing [`DisplayNode`]s
//! - [`diagnostics`]: where configuration problems and dumps are reported
//!
//! [`Inspector`] ties them together and is what a front end holds on to. Each
//! call to [`Inspector::render`] is one *pass*: a fresh cycle detector and node
//! counter are created and dropped, while collapse state and the UI flags
//! survive between passes.

pub mod classify;
pub mod collapse;
pub mod cycle;
pub mod diagnostics;
pub mod members;
pub mod node;
pub mod path;
pub mod tree;

pub use classify::{classify, Category};
pub use collapse::PathCollapseStore;
pub use diagnostics::{Console, DiagnosticSink, TracingSink};
pub use members::{ClassChainWalker, MemberWalker};
pub use node::{Activation, DisplayNode, NodeBody, PassStats, Row, View};

use crate::config::InspectorConfig;
use crate::value::Value;
use std::rc::Rc;
use std::time::Instant;

/// Inspector state that lives across passes
pub struct Inspector {
    header: bool,
    title: String,
    minimized: bool,
    count: bool,
    store: PathCollapseStore,
    walker: Box<dyn MemberWalker>,
    sink: Rc<dyn DiagnosticSink>,
}

impl Inspector {
    /// Inspector with the default class walker, reporting through `tracing`
    pub fn new(config: &InspectorConfig, root: &Value) -> Self {
        Self::with_parts(config, root, Box::new(ClassChainWalker), Rc::new(TracingSink))
    }

    /// Inspector reporting to `sink`
    pub fn with_sink(config: &InspectorConfig, root: &Value, sink: Rc<dyn DiagnosticSink>) -> Self {
        Self::with_parts(config, root, Box::new(ClassChainWalker), sink)
    }

    /// Fully customized inspector. Configuration problems are reported to
    /// `sink` here, once.
    pub fn with_parts(
        config: &InspectorConfig,
        root: &Value,
        walker: Box<dyn MemberWalker>,
        sink: Rc<dyn DiagnosticSink>,
    ) -> Self {
        let top_level = tree::top_level_keys(root, walker.as_ref());
        let (store, errors) = PathCollapseStore::configure(config, &top_level);
        for error in &errors {
            sink.config_error(error);
        }

        Inspector {
            header: config.header,
            title: config.display_title().to_string(),
            minimized: config.minimize,
            count: config.count,
            store,
            walker,
            sink,
        }
    }

    /// Run one pass over `root`
    pub fn render(&self, root: &Value) -> View {
        let start = Instant::now();
        let (root, nodes) = if self.minimized {
            (None, 0)
        } else {
            let pass = tree::run_pass(root, &self.store, self.walker.as_ref());
            (Some(pass.root), pass.nodes)
        };
        let stats = PassStats {
            nodes,
            elapsed: start.elapsed(),
        };
        tracing::debug!(nodes, elapsed_us = stats.elapsed.as_micros() as u64, "pass");

        View {
            title: self.header.then(|| self.title.clone()),
            minimized: self.minimized,
            root,
            stats,
            show_stats: self.count,
        }
    }

    /// Host callback: flip the collapse state of `path`; returns whether it is now collapsed
    pub fn toggle_collapse(&mut self, path: &str) -> bool {
        let collapsed = self.store.toggle(path);
        tracing::debug!(path, collapsed, "toggle");
        collapsed
    }

    /// Host callback: the literal path to show the user, only for elements that carry one
    pub fn reveal_path(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(str::to_string)
    }

    /// Send an opaque node's raw value to the diagnostic channel; returns false
    /// when the node has nothing to dump
    pub fn dump(&self, node: &DisplayNode) -> bool {
        match node.activation() {
            Some(Activation::Dump { label, raw }) => {
                self.sink.dump(&node.path, &label, &raw);
                true
            }
            _ => false,
        }
    }

    /// Perform an activation produced by the display tree
    pub fn activate(&mut self, path: &str, activation: &Activation) {
        match activation {
            Activation::Toggle(target) => {
                self.toggle_collapse(target);
            }
            Activation::Dump { label, raw } => self.sink.dump(path, label, raw),
        }
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollapseOption;

    #[test]
    fn test_view_flags() {
        let config = InspectorConfig {
            header: false,
            count: true,
            ..InspectorConfig::default()
        };
        let root = Value::object([("a", Value::from(1))]);
        let mut inspector = Inspector::new(&config, &root);

        let view = inspector.render(&root);
        assert_eq!(view.title, None);
        assert_eq!(view.stats.nodes, 2);
        assert!(view.footer().unwrap().starts_with("2 nodes · "));

        inspector.toggle_minimized();
        let view = inspector.render(&root);
        assert!(view.minimized);
        assert!(view.root.is_none());
        assert_eq!(view.footer(), None);
    }

    #[test]
    fn test_toggle_persists_across_passes() {
        let root = Value::object([("a", Value::object([("b", Value::from(1))]))]);
        let mut inspector = Inspector::new(&InspectorConfig::default(), &root);
        assert_eq!(inspector.render(&root).stats.nodes, 3);

        assert!(inspector.toggle_collapse("$.a"));
        assert_eq!(inspector.render(&root).stats.nodes, 2);
        assert_eq!(inspector.render(&root).stats.nodes, 2);

        inspector.activate("$.a", &Activation::Toggle("$.a".to_string()));
        assert_eq!(inspector.render(&root).stats.nodes, 3);
    }

    #[test]
    fn test_config_errors_reach_sink() {
        let console = Rc::new(Console::new());
        let config = InspectorConfig {
            collapse: Some(CollapseOption::Invalid(serde_json::json!("sideways"))),
            ..InspectorConfig::default()
        };
        let root = Value::object([("a", Value::from(1))]);
        let inspector = Inspector::with_sink(&config, &root, console.clone());

        assert_eq!(console.len(), 1);
        assert_eq!(inspector.render(&root).stats.nodes, 2);
    }

    #[test]
    fn test_reveal_path_guard() {
        let root = Value::Null;
        let inspector = Inspector::new(&InspectorConfig::default(), &root);
        assert_eq!(inspector.reveal_path(Some("$.a[0]")), Some("$.a[0]".to_string()));
        assert_eq!(inspector.reveal_path(None), None);
        assert_eq!(inspector.reveal_path(Some("")), None);
    }

    #[test]
    fn test_dump_only_for_opaque_nodes() {
        let console = Rc::new(Console::new());
        let root = Value::object([
            ("buf", Value::buffer(crate::value::BufferKind::Uint8, vec![1, 2])),
            ("n", Value::from(1)),
        ]);
        let inspector = Inspector::with_sink(&InspectorConfig::default(), &root, console.clone());
        let view = inspector.render(&root);
        let tree = view.root.unwrap();

        assert!(inspector.dump(tree.find("$.buf").unwrap()));
        assert!(!inspector.dump(tree.find("$.n").unwrap()));
        assert_eq!(console.get_output()[0].text, "$.buf Uint8Array: Uint8Array [1, 2]");
    }
}
