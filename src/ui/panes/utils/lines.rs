//! Flatten a display tree into one line per row

use crate::inspector::{path, Activation, Category, DisplayNode, NodeBody};

/// What a line shows after its key
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Path of the rendered node
    pub path: String,
    pub category: Category,
    pub body: SummaryBody,
    pub dump: Option<Activation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryBody {
    Leaf(String),
    Empty(Option<String>),
    Circular,
    Labeled(String, Option<String>),
    /// Header of a table: its label and row count
    Table(Option<String>, usize),
}

/// One visible line of the tree pane
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine {
    pub depth: usize,
    pub key: Option<String>,
    /// Address used for toggling and revealing
    pub path: Option<String>,
    pub collapsed: bool,
    /// `None` when collapsed
    pub summary: Option<Summary>,
}

impl TreeLine {
    pub fn has_children(&self) -> bool {
        matches!(
            self.summary,
            Some(Summary {
                body: SummaryBody::Table(..),
                ..
            })
        )
    }
}

pub(crate) fn flatten(root: &DisplayNode) -> Vec<TreeLine> {
    let mut lines = vec![TreeLine {
        depth: 0,
        key: Some(path::ROOT.to_string()),
        path: None,
        collapsed: false,
        summary: Some(summarize(root)),
    }];
    push_rows(&mut lines, root, 1);
    lines
}

fn push_rows(lines: &mut Vec<TreeLine>, node: &DisplayNode, depth: usize) {
    for row in node.rows() {
        lines.push(TreeLine {
            depth,
            key: row.key.clone(),
            path: row.path.clone(),
            collapsed: row.collapsed,
            summary: row.value.as_ref().map(summarize),
        });
        if let Some(child) = &row.value {
            push_rows(lines, child, depth + 1);
        }
    }
}

fn summarize(node: &DisplayNode) -> Summary {
    let body = match &node.body {
        NodeBody::Leaf(text) => SummaryBody::Leaf(text.clone()),
        NodeBody::Empty { label } => SummaryBody::Empty(label.clone()),
        NodeBody::Circular => SummaryBody::Circular,
        NodeBody::Labeled { label, text } | NodeBody::Dump { label, text, .. } => {
            SummaryBody::Labeled(label.clone(), text.clone())
        }
        NodeBody::Table { label, rows } => SummaryBody::Table(label.clone(), rows.len()),
    };
    Summary {
        path: node.path.clone(),
        category: node.category,
        body,
        dump: node.activation(),
    }
}
