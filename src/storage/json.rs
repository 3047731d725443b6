//! File-backed JSON document store

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::storage::DocumentStore;

/// Stores each named document as `<root>/<name>.json`.
///
/// Saves go through a temp file followed by a rename, so a crash mid-write
/// never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at the given data directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this store writes under
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl DocumentStore for JsonStore {
    fn load_value(&self, name: &str) -> serde_json::Value {
        let path = self.document_path(name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(document = name, "no document yet");
                return serde_json::Value::Null;
            },
            Err(err) => {
                tracing::warn!(document = name, %err, "failed to read document, treating as empty");
                return serde_json::Value::Null;
            },
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(document = name, %err, "corrupt document, treating as empty");
                serde_json::Value::Null
            },
        }
    }

    fn save_value(&self, name: &str, value: &serde_json::Value) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.document_path(name);
        let tmp = self.root.join(format!(".{name}.json.tmp"));
        fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
