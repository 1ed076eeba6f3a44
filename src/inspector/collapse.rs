//! Persistent collapse state keyed by path
//!
//! The store only records *presence*. What presence means depends on the mode:
//!
//! | mode     | path present | path absent |
//! |----------|--------------|-------------|
//! | normal   | collapsed    | expanded    |
//! | reversed | expanded     | collapsed   |
//!
//! Entries for paths that no longer exist in the data are harmless.

use super::path;
use crate::config::{CollapseOption, ConfigError, InspectorConfig};
use rustc_hash::FxHashSet;

/// A direct child of the root, as the initial collapse policy sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelKey {
    pub key: String,
    pub path: String,
}

#[derive(Debug, Clone, Default)]
pub struct PathCollapseStore {
    marked: FxHashSet<String>,
    reversed: bool,
}

impl PathCollapseStore {
    /// Empty store in normal mode: everything expanded
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store in reversed mode: everything collapsed
    pub fn reversed() -> Self {
        PathCollapseStore {
            marked: FxHashSet::default(),
            reversed: true,
        }
    }

    /// Build the initial state from configuration.
    ///
    /// `top_level` lists the root's direct children. Problems are returned for
    /// the caller to report; initialization itself never fails.
    pub fn configure(
        config: &InspectorConfig,
        top_level: &[TopLevelKey],
    ) -> (Self, Vec<ConfigError>) {
        let mut store = Self::new();
        let mut errors = Vec::new();

        match &config.collapse {
            None | Some(CollapseOption::Off) => {}
            Some(CollapseOption::Top) => {
                for child in top_level {
                    store.marked.insert(child.path.clone());
                }
            }
            Some(CollapseOption::Keys(keys)) => {
                for key in keys {
                    store.marked.insert(top_level_path(top_level, key));
                }
            }
            Some(CollapseOption::All) => store.reversed = true,
            Some(CollapseOption::Invalid(found)) => {
                errors.push(ConfigError::InvalidCollapse {
                    found: found.to_string(),
                });
            }
        }

        if let Some(except) = &config.collapse_except {
            if store.reversed {
                errors.push(ConfigError::ConflictingCollapse);
            } else {
                for child in top_level {
                    if !except.contains(&child.key) {
                        store.marked.insert(child.path.clone());
                    }
                }
            }
        }

        (store, errors)
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.marked.contains(path) != self.reversed
    }

    /// Flip presence of `path`; returns whether it is now collapsed
    pub fn toggle(&mut self, path: &str) -> bool {
        if !self.marked.remove(path) {
            self.marked.insert(path.to_string());
        }
        self.is_collapsed(path)
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Number of recorded paths
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }
}

fn top_level_path(top_level: &[TopLevelKey], key: &str) -> String {
    top_level
        .iter()
        .find(|child| child.key == key)
        .map(|child| child.path.clone())
        .unwrap_or_else(|| path::member(path::ROOT, key))
}
