//! Inspector configuration
//!
//! [`InspectorConfig`] mirrors the options a host passes when mounting the
//! inspector. It deserializes from JSON with camelCase names:
//!
//! ```json
//! { "title": "state", "collapse": "top", "count": true }
//! ```
//!
//! `collapse` is parsed leniently: any unexpected value becomes
//! [`CollapseOption::Invalid`] and is reported as a [`ConfigError`] when the
//! collapse store is initialized, instead of failing the whole document.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "XRay";

/// Initial collapse policy
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum CollapseOption {
    /// Collapse every direct child of the root
    Top,
    /// Collapse only these top-level keys
    Keys(Vec<String>),
    /// Start fully collapsed; toggles record expanded exceptions
    All,
    /// Explicitly off: any falsy value (`false`, `null`, `""`, `0`)
    Off,
    /// Anything else, kept for the diagnostic
    Invalid(serde_json::Value),
}

impl From<serde_json::Value> for CollapseOption {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::String(s) if s == "top" => CollapseOption::Top,
            serde_json::Value::Bool(true) => CollapseOption::All,
            serde_json::Value::Bool(false) | serde_json::Value::Null => CollapseOption::Off,
            serde_json::Value::String(s) if s.is_empty() => CollapseOption::Off,
            serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => CollapseOption::Off,
            serde_json::Value::Array(items) => match key_list(&items) {
                Some(keys) => CollapseOption::Keys(keys),
                None => CollapseOption::Invalid(serde_json::Value::Array(items)),
            },
            other => CollapseOption::Invalid(other),
        }
    }
}

/// Keys given as strings or numbers; anything else invalidates the list
fn key_list(items: &[serde_json::Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

/// Options recognized by the inspector
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectorConfig {
    /// Show the title header
    pub header: bool,
    pub title: String,
    /// Start minimized
    pub minimize: bool,
    pub collapse: Option<CollapseOption>,
    /// Collapse every top-level key except these
    pub collapse_except: Option<Vec<String>>,
    /// Show the node count and timing footer
    pub count: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        InspectorConfig {
            header: true,
            title: DEFAULT_TITLE.to_string(),
            minimize: false,
            collapse: None,
            collapse_except: None,
            count: false,
        }
    }
}

impl InspectorConfig {
    /// Title to display; an empty title falls back to the default
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }
}

/// Non-fatal configuration problems
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid param :collapse: must be \"top\", true or an array of keys, got {found}")]
    InvalidCollapse { found: String },

    #[error("invalid param :collapseExcept: ignored because :collapse: is true")]
    ConflictingCollapse,
}
