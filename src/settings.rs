//! Service settings
//!
//! Layered: built-in defaults, then an optional `ticketry.toml`, then
//! `TICKETRY_*` environment variables. The owner id is the out-of-band
//! principal allowed to grant licenses; it is configuration, not a guild
//! role or permission.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::surface::UserId;

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "ticketry")
        .map_or_else(|| PathBuf::from("data"), |dirs| dirs.data_dir().to_path_buf())
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding the persisted JSON documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Liveness endpoint bind address
    #[serde(default = "default_bind")]
    pub bind: String,
    /// The only principal allowed to grant licenses
    #[serde(default)]
    pub owner: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind: default_bind(),
            owner: 0,
        }
    }
}

impl Settings {
    /// Load settings from the optional file plus environment overrides
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        match file {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            },
            None => {
                builder = builder.add_source(config::File::with_name("ticketry").required(false));
            },
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("TICKETRY").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// The license-granting principal
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        UserId(self.owner)
    }
}
