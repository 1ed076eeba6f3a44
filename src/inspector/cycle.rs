//! Circular reference detection by path lineage
//!
//! Identity alone is not enough to spot a cycle: the same value may be reachable
//! from two unrelated places (an alias), and both occurrences should be shown.
//! A value is only circular when it shows up again *below* a place where it
//! was already visited during the current pass.

use super::path;
use crate::value::{Identity, Value};
use rustc_hash::FxHashMap;

/// Outcome of visiting a compound value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First visit, or an alias reached by an unrelated route
    Fresh,
    /// Seen before at exactly this path
    Reentrant,
    /// Seen before at an ancestor of this path
    Circular,
}

/// Pass-scoped visitation record.
///
/// Keys are allocation addresses, so tracked values are never kept alive by the
/// detector. Build a new one for every pass.
#[derive(Debug, Default)]
pub struct CycleDetector {
    seen: FxHashMap<Identity, Vec<String>>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` at `path` and decide whether traversal may continue.
    ///
    /// Scalars always come back [`Visit::Fresh`] and are not recorded.
    pub fn visit(&mut self, value: &Value, path: &str) -> Visit {
        let Some(id) = value.identity() else {
            return Visit::Fresh;
        };

        let Some(paths) = self.seen.get_mut(&id) else {
            self.seen.insert(id, vec![path.to_string()]);
            return Visit::Fresh;
        };

        for seen in paths.iter() {
            if seen == path {
                return Visit::Reentrant;
            }
            if path::is_descendant(path, seen) {
                return Visit::Circular;
            }
        }

        paths.push(path.to_string());
        Visit::Fresh
    }

    /// Paths recorded for `value` so far
    pub fn paths(&self, value: &Value) -> &[String] {
        value
            .identity()
            .and_then(|id| self.seen.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct compound values seen this pass
    pub fn tracked(&self) -> usize {
        self.seen.len()
    }
}
