//! Path syntax
//!
//! A path addresses a node from the root and doubles as its collapse-state key:
//!
//! ```text
//! $              root
//! $.name         object member, function property, instance member, map entry
//! $[3]           array index
//! $.list[0].id   nesting
//! ```

/// Root sentinel
pub const ROOT: &str = "$";

/// Path of a named member under `parent`
pub fn member(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

/// Path of an indexed element under `parent`
pub fn index(parent: &str, i: usize) -> String {
    format!("{}[{}]", parent, i)
}

/// True when `path` lies strictly below `ancestor`.
///
/// The character right after the shared prefix must be a separator, so
/// `$.ab` is not below `$.a`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && matches!(path.as_bytes()[ancestor.len()], b'.' | b'[')
}
