//! Display tree produced by one pass
//!
//! Nodes are plain data: they hold text and paths, never references into the
//! inspected value, and are dropped once the front end has drawn them.

use super::classify::Category;
use std::fmt;
use std::time::Duration;

/// What a host can do when the user activates an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Flip the collapse state of this path
    Toggle(String),
    /// Send the raw value to the diagnostic channel
    Dump { label: String, raw: String },
}

/// Rendered form of one value
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    pub path: String,
    pub category: Category,
    pub body: NodeBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    /// Scalar text: numbers, booleans, non-empty strings, `null`, `undefined`
    Leaf(String),
    /// Empty string, array or object, or an empty labeled collection
    Empty { label: Option<String> },
    /// Reached again below one of its own occurrences
    Circular,
    /// Labeled value that is not decomposed: BigInt, Symbol, Date, Promise,
    /// instances and callables without rows
    Labeled { label: String, text: Option<String> },
    /// Opaque value whose activation dumps `raw`
    Dump {
        label: String,
        text: Option<String>,
        raw: String,
    },
    /// One row per member
    Table { label: Option<String>, rows: Vec<Row> },
}

/// One member of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// `None` for set elements
    pub key: Option<String>,
    /// Address for toggling and revealing; `None` when not addressable
    pub path: Option<String>,
    pub collapsed: bool,
    /// Rendered member, absent when collapsed
    pub value: Option<DisplayNode>,
}

impl Row {
    pub fn activation(&self) -> Option<Activation> {
        self.path.clone().map(Activation::Toggle)
    }
}

impl DisplayNode {
    pub fn activation(&self) -> Option<Activation> {
        match &self.body {
            NodeBody::Dump { label, raw, .. } => Some(Activation::Dump {
                label: label.clone(),
                raw: raw.clone(),
            }),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[Row] {
        match &self.body {
            NodeBody::Table { rows, .. } => rows,
            _ => &[],
        }
    }

    pub fn is_circular(&self) -> bool {
        matches!(self.body, NodeBody::Circular)
    }

    pub fn is_empty_marker(&self) -> bool {
        matches!(self.body, NodeBody::Empty { .. })
    }

    /// Depth-first search for the node rendered at `path`
    pub fn find(&self, path: &str) -> Option<&DisplayNode> {
        if self.path == path {
            return Some(self);
        }
        self.rows()
            .iter()
            .filter_map(|row| row.value.as_ref())
            .find_map(|child| child.find(path))
    }

    /// Depth-first search for the row addressed by `path`
    pub fn find_row(&self, path: &str) -> Option<&Row> {
        for row in self.rows() {
            if row.path.as_deref() == Some(path) {
                return Some(row);
            }
            if let Some(found) = row.value.as_ref().and_then(|child| child.find_row(path)) {
                return Some(found);
            }
        }
        None
    }
}

/// Node count and elapsed time of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub nodes: usize,
    pub elapsed: Duration,
}

impl fmt::Display for PassStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes · {}ms", self.nodes, self.elapsed.as_millis())
    }
}

/// Everything the front end needs to draw after one pass
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Present when the header is shown
    pub title: Option<String>,
    pub minimized: bool,
    /// Absent while minimized
    pub root: Option<DisplayNode>,
    pub stats: PassStats,
    /// Whether the stats footer should be shown
    pub show_stats: bool,
}

impl View {
    pub fn footer(&self) -> Option<String> {
        (self.show_stats && self.root.is_some()).then(|| self.stats.to_string())
    }
}
