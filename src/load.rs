//! Loading values and configuration from disk

use crate::config::InspectorConfig;
use crate::value::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON document into an inspectable value
pub fn load_value(path: &Path) -> Result<Value, LoadError> {
    let text = read(path)?;
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Value::from(json))
}

/// Parse an inspector configuration file
pub fn load_config(path: &Path) -> Result<InspectorConfig, LoadError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
