//! Settings for the demonstration binary.
//!
//! Read from an optional `shelving.toml` in the working directory, with
//! `SHELVING_*` environment variables layered on top. Every key has a
//! default, so the binary also runs with no file present at all.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::construct::{ReshelvePolicy, ShelfPlan};
use crate::error::{Result, ShelvingError};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the library to construct.
    pub library: String,
    /// Number of shelves.
    pub shelves: usize,
    /// Uniform capacity of each shelf.
    pub capacity: usize,
    /// Explicit shelf identifiers; auto-generated when left empty.
    pub identifiers: Vec<String>,
    /// What to do when an already shelved book is shelved again.
    pub policy: ReshelvePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library: String::from("Local Branch"),
            shelves: 3,
            capacity: 100,
            identifiers: Vec::new(),
            policy: ReshelvePolicy::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let loaded = Config::builder()
            .add_source(File::with_name("shelving").required(false))
            .add_source(
                Environment::with_prefix("SHELVING")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("identifiers"),
            )
            .build()
            .map_err(|e| ShelvingError::Config(e.to_string()))?;
        loaded
            .try_deserialize()
            .map_err(|e| ShelvingError::Config(e.to_string()))
    }

    pub fn plan(&self) -> ShelfPlan {
        if self.identifiers.is_empty() {
            ShelfPlan::uniform(self.shelves, self.capacity)
        } else {
            ShelfPlan::labeled(self.shelves, self.capacity, self.identifiers.clone())
        }
    }
}
