//! Recursive tree building
//!
//! [`TreeBuilder`] turns a value into a [`DisplayNode`] tree for one pass. For
//! every node it:
//!
//! 1. asks the [`CycleDetector`] whether a compound value may be entered,
//!    emitting a circular marker (uncounted) when it may not;
//! 2. counts the node;
//! 3. dispatches on the [`Category`], consulting the collapse store for every
//!    addressable row. A collapsed row is pruned: nothing below it is visited,
//!    classified or counted.

use super::classify::{classify, Category};
use super::collapse::{PathCollapseStore, TopLevelKey};
use super::cycle::{CycleDetector, Visit};
use super::members::{function_members, instance_members, MemberWalker};
use super::node::{DisplayNode, NodeBody, Row};
use super::path;
use crate::value::{format_number, Object, ObjectKind, Value};

/// Text shown when a value cannot be converted to text
pub const PLACEHOLDER: &str = "unknown";

/// Label shown for values of unknown type
pub const UNKNOWN_LABEL: &str = "?";

/// Name shown for callables without one
pub const ANONYMOUS: &str = "[Anonymous]";

/// Label of a circular reference marker
pub const CIRCULAR_LABEL: &str = "CircularReference";

/// Output of one complete traversal
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub root: DisplayNode,
    pub nodes: usize,
}

/// Traverse `root` once with a fresh detector and counter
pub fn run_pass(root: &Value, store: &PathCollapseStore, walker: &dyn MemberWalker) -> Pass {
    let mut builder = TreeBuilder::new(store, walker);
    let root = builder.render(root, path::ROOT);
    Pass {
        root,
        nodes: builder.node_count(),
    }
}

/// Direct children of the root with their paths, as used by the initial collapse policy
pub fn top_level_keys(root: &Value, walker: &dyn MemberWalker) -> Vec<TopLevelKey> {
    let Value::Object(obj) = root else {
        return Vec::new();
    };
    keyed_members(&obj.borrow(), classify(root), path::ROOT, walker)
        .unwrap_or_default()
        .into_iter()
        .map(|m| TopLevelKey {
            key: m.key,
            path: m.path,
        })
        .collect()
}

/// An addressable child
struct Member {
    key: String,
    path: String,
    value: Value,
}

/// Keyed children of a compound value, `None` for categories without addressable members
fn keyed_members(
    obj: &Object,
    category: Category,
    parent: &str,
    walker: &dyn MemberWalker,
) -> Option<Vec<Member>> {
    let named = |members: Vec<(String, Value)>| -> Vec<Member> {
        members
            .into_iter()
            .map(|(key, value)| Member {
                path: path::member(parent, &key),
                key,
                value,
            })
            .collect()
    };

    let members = match (category, &obj.kind) {
        (Category::Array, ObjectKind::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, value)| Member {
                key: i.to_string(),
                path: path::index(parent, i),
                value: value.clone(),
            })
            .collect(),
        (Category::PlainObject, _) => named(obj.props.clone()),
        (Category::ClassInstance | Category::StorageLike, kind) => {
            let class = match kind {
                ObjectKind::Instance(class) => Some(class),
                _ => None,
            };
            named(instance_members(&obj.props, class, walker))
        }
        (Category::Function | Category::MathLike, _) => named(function_members(&obj.props)),
        (Category::Map, ObjectKind::Map(entries)) => entries
            .iter()
            .map(|(key, value)| {
                let key = key.to_text().unwrap_or_else(|_| PLACEHOLDER.to_string());
                Member {
                    path: path::member(parent, &key),
                    key,
                    value: value.clone(),
                }
            })
            .collect(),
        _ => return None,
    };
    Some(members)
}

/// Pass-scoped traversal state
pub struct TreeBuilder<'a> {
    store: &'a PathCollapseStore,
    walker: &'a dyn MemberWalker,
    detector: CycleDetector,
    nodes: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(store: &'a PathCollapseStore, walker: &'a dyn MemberWalker) -> Self {
        TreeBuilder {
            store,
            walker,
            detector: CycleDetector::new(),
            nodes: 0,
        }
    }

    /// Nodes rendered so far, circular markers excluded
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Render `value` found at `path`
    pub fn render(&mut self, value: &Value, path: &str) -> DisplayNode {
        let category = classify(value);

        if category.is_compound() && self.detector.visit(value, path) == Visit::Circular {
            tracing::trace!(path, "circular reference");
            return DisplayNode {
                path: path.to_string(),
                category,
                body: NodeBody::Circular,
            };
        }

        self.nodes += 1;

        let body = match value {
            Value::Undefined => NodeBody::Leaf("undefined".to_string()),
            Value::Null => NodeBody::Leaf("null".to_string()),
            Value::Bool(b) => NodeBody::Leaf(b.to_string()),
            Value::Number(n) => NodeBody::Leaf(format_number(*n)),
            Value::BigInt(n) => NodeBody::Labeled {
                label: "BigInt".to_string(),
                text: Some(n.to_string()),
            },
            Value::Symbol(desc) => NodeBody::Labeled {
                label: "Symbol".to_string(),
                text: desc.clone(),
            },
            Value::String(s) if s.is_empty() => NodeBody::Empty { label: None },
            Value::String(s) => NodeBody::Leaf(s.clone()),
            Value::Object(obj) => self.compound(&obj.borrow(), category, path),
        };

        DisplayNode {
            path: path.to_string(),
            category,
            body,
        }
    }

    fn compound(&mut self, obj: &Object, category: Category, path: &str) -> NodeBody {
        match category {
            Category::Array | Category::PlainObject => {
                let members = self.members(obj, category, path);
                if members.is_empty() {
                    NodeBody::Empty { label: None }
                } else {
                    self.table(None, members)
                }
            }
            Category::ClassInstance | Category::StorageLike => {
                let type_name = match &obj.kind {
                    ObjectKind::Instance(class) if class.name.is_empty() => "anonymous",
                    ObjectKind::Instance(class) => class.name.as_str(),
                    _ => "Storage",
                };
                let label = format!("{} instance", type_name);
                let members = self.members(obj, category, path);
                self.labeled_table(label, members)
            }
            Category::Function | Category::MathLike => {
                let (kind, name) = match &obj.kind {
                    ObjectKind::Function { kind, name } => (kind.name(), name.as_deref()),
                    _ => (obj.kind.tag(), None),
                };
                let label = format!(
                    "{} {}",
                    kind,
                    name.filter(|n| !n.is_empty()).unwrap_or(ANONYMOUS)
                );
                let members = self.members(obj, category, path);
                self.labeled_table(label, members)
            }
            Category::Map => {
                let members = self.members(obj, category, path);
                if members.is_empty() {
                    NodeBody::Empty {
                        label: Some("Map".to_string()),
                    }
                } else {
                    self.table(Some("Map".to_string()), members)
                }
            }
            Category::Set => self.set(obj, path),
            Category::Date | Category::RegExp | Category::Error => NodeBody::Labeled {
                label: category.to_string(),
                text: Some(obj.to_text().unwrap_or_else(|_| PLACEHOLDER.to_string())),
            },
            Category::Promise | Category::WeakMap | Category::WeakSet => NodeBody::Labeled {
                label: category.to_string(),
                text: None,
            },
            Category::TypedBuffer(kind) => NodeBody::Dump {
                label: kind.name().to_string(),
                text: None,
                raw: raw_dump(obj),
            },
            Category::Unknown => {
                let text = obj.to_text().unwrap_or_else(|error| {
                    tracing::debug!(path, %error, "text conversion failed");
                    PLACEHOLDER.to_string()
                });
                NodeBody::Dump {
                    label: UNKNOWN_LABEL.to_string(),
                    text: Some(text),
                    raw: raw_dump(obj),
                }
            }
            // Scalar categories never come from an object
            Category::Null
            | Category::Undefined
            | Category::Boolean
            | Category::Number
            | Category::BigInt
            | Category::Symbol
            | Category::String(_) => NodeBody::Leaf(obj.kind.tag().to_string()),
        }
    }

    fn members(&self, obj: &Object, category: Category, path: &str) -> Vec<Member> {
        keyed_members(obj, category, path, self.walker).unwrap_or_default()
    }

    /// Label alone when there are no rows, a labeled table otherwise
    fn labeled_table(&mut self, label: String, members: Vec<Member>) -> NodeBody {
        if members.is_empty() {
            NodeBody::Labeled { label, text: None }
        } else {
            self.table(Some(label), members)
        }
    }

    fn table(&mut self, label: Option<String>, members: Vec<Member>) -> NodeBody {
        let rows = members
            .into_iter()
            .map(|member| self.row(member))
            .collect();
        NodeBody::Table { label, rows }
    }

    /// A collapsed row still counts as a node; only what lies below it is pruned
    fn row(&mut self, member: Member) -> Row {
        if self.store.is_collapsed(&member.path) {
            self.nodes += 1;
            return Row {
                key: Some(member.key),
                path: Some(member.path),
                collapsed: true,
                value: None,
            };
        }
        let child = self.render(&member.value, &member.path);
        Row {
            key: Some(member.key),
            path: Some(member.path),
            collapsed: false,
            value: Some(child),
        }
    }

    /// Set elements are unkeyed and never pruned. They are still traversed
    /// under an index path so a set containing itself is caught as circular.
    fn set(&mut self, obj: &Object, path: &str) -> NodeBody {
        let label = Some("Set".to_string());
        let items = match &obj.kind {
            ObjectKind::Set(items) => items.as_slice(),
            _ => &[],
        };
        if items.is_empty() {
            return NodeBody::Empty { label };
        }
        let rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| Row {
                key: None,
                path: None,
                collapsed: false,
                value: Some(self.render(item, &path::index(path, i))),
            })
            .collect();
        NodeBody::Table { label, rows }
    }
}

/// Raw form sent to the diagnostic channel on activation
fn raw_dump(obj: &Object) -> String {
    match &obj.kind {
        ObjectKind::Buffer { kind, bytes } => {
            format!("{} [{}]", kind.name(), kind.decode(bytes).join(", "))
        }
        ObjectKind::Host(host) => format!("{:?}", host),
        _ => format!("{:?}", obj),
    }
}
