//! Diagnostic channel
//!
//! Configuration problems and value dumps go to a [`DiagnosticSink`]. The
//! default [`TracingSink`] emits `tracing` events; [`Console`] also keeps the
//! lines so a front end can show them.

use crate::config::ConfigError;
use std::cell::RefCell;

pub trait DiagnosticSink {
    fn config_error(&self, error: &ConfigError);

    /// Raw dump of a value that is not expanded in the tree
    fn dump(&self, path: &str, label: &str, raw: &str);
}

/// Forwards everything to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn config_error(&self, error: &ConfigError) {
        tracing::warn!(%error, "configuration");
    }

    fn dump(&self, path: &str, label: &str, raw: &str) {
        tracing::info!(path, label, raw, "dump");
    }
}

/// Severity of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Error,
    Info,
}

/// A line of console output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: ConsoleLevel,
    pub text: String,
}

/// Buffered diagnostic output for display
#[derive(Debug, Default)]
pub struct Console {
    lines: RefCell<Vec<ConsoleLine>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: ConsoleLevel, text: String) {
        self.lines.borrow_mut().push(ConsoleLine { level, text });
    }

    /// All lines, multi-line entries split
    pub fn get_output(&self) -> Vec<ConsoleLine> {
        self.lines
            .borrow()
            .iter()
            .flat_map(|line| {
                line.text.lines().map(|text| ConsoleLine {
                    level: line.level,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl DiagnosticSink for Console {
    fn config_error(&self, error: &ConfigError) {
        TracingSink.config_error(error);
        self.push(ConsoleLevel::Error, format!("XRay {}", error));
    }

    fn dump(&self, path: &str, label: &str, raw: &str) {
        TracingSink.dump(path, label, raw);
        self.push(ConsoleLevel::Info, format!("{} {}: {}", path, label, raw));
    }
}
