//! Persistence layer
//!
//! Three independent key-value JSON documents back the service: the license
//! registry, the guild configuration set, and the staff credit ledger. The
//! [`DocumentStore`] trait is the seam between the managers that own each
//! document and the file mechanics; [`JsonStore`] is the file-backed
//! implementation.
//!
//! Contract: loading a missing or corrupt document yields an empty one;
//! callers treat absence as "no data yet", never as a failure. Corruption
//! is logged so it stays visible, but is not surfaced as an error.

mod json;

pub use json::JsonStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::Result;

/// Seam over named-document persistence.
///
/// Implementations are free to choose layout and format; callers only see
/// JSON values. Each read-modify-write cycle on a document is funneled
/// through the single manager that owns it, so no locking happens here.
pub trait DocumentStore: Send + Sync {
    /// Tolerant load: a missing or unparseable document is `Value::Null`
    fn load_value(&self, name: &str) -> serde_json::Value;

    /// Full overwrite of the named document
    fn save_value(&self, name: &str, value: &serde_json::Value) -> Result<()>;
}

/// Typed map helpers over [`DocumentStore`]
pub trait DocumentStoreExt: DocumentStore {
    /// Load a document as a string-keyed map; absence or corruption at the
    /// document level yields an empty map.
    fn load_map<T: DeserializeOwned>(&self, name: &str) -> HashMap<String, T> {
        let value = self.load_value(name);
        if value.is_null() {
            return HashMap::new();
        }
        serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(document = name, %err, "document has unexpected shape, treating as empty");
            HashMap::new()
        })
    }

    /// Persist a string-keyed map as the named document
    fn save_map<T: Serialize>(&self, name: &str, map: &HashMap<String, T>) -> Result<()> {
        self.save_value(name, &serde_json::to_value(map)?)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

/// Document names used by the service
pub mod documents {
    /// Guild id → license expiry date (`YYYY-MM-DD`)
    pub const LICENSES: &str = "licenses";
    /// Guild id → configuration object
    pub const GUILDS: &str = "guilds";
    /// User id → cumulative claim count
    pub const CREDITS: &str = "credits";
}
