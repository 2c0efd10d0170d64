//! File-based digraph store.
//!
//! Each digraph is one file `{base_path}/{name}.json` or `.yaml` holding
//! its actions, valuation domain, relation matrix and optional veto record.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ports::{DigraphStore, StoreError, StoredDigraph};

/// Encoding of stored digraph files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigraphEncoding {
    #[default]
    Json,
    Yaml,
}

impl DigraphEncoding {
    fn extension(&self) -> &'static str {
        match self {
            DigraphEncoding::Json => "json",
            DigraphEncoding::Yaml => "yaml",
        }
    }
}

/// Stores digraphs as JSON or YAML files under a base directory.
#[derive(Debug, Clone)]
pub struct FileDigraphStore {
    base_path: PathBuf,
    encoding: DigraphEncoding,
}

impl FileDigraphStore {
    /// Creates a store rooted at `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P, encoding: DigraphEncoding) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            encoding,
        }
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", name, self.encoding.extension()))
    }

    fn encode(&self, stored: &StoredDigraph) -> Result<String, StoreError> {
        match self.encoding {
            DigraphEncoding::Json => serde_json::to_string_pretty(stored)
                .map_err(|e| StoreError::SerializationFailed(e.to_string())),
            DigraphEncoding::Yaml => {
                serde_yaml::to_string(stored).map_err(|e| StoreError::SerializationFailed(e.to_string()))
            }
        }
    }

    fn decode(&self, text: &str) -> Result<StoredDigraph, StoreError> {
        match self.encoding {
            DigraphEncoding::Json => {
                serde_json::from_str(text).map_err(|e| StoreError::SerializationFailed(e.to_string()))
            }
            DigraphEncoding::Yaml => {
                serde_yaml::from_str(text).map_err(|e| StoreError::SerializationFailed(e.to_string()))
            }
        }
    }
}

impl DigraphStore for FileDigraphStore {
    fn save(&self, name: &str, stored: &StoredDigraph) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path)?;
        let encoded = self.encode(stored)?;
        fs::write(self.file_path(name), encoded)?;
        tracing::debug!(name, order = stored.digraph.order(), "digraph saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<StoredDigraph, StoreError> {
        let path = self.file_path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(format!("digraph '{}'", name)));
        }
        let text = fs::read_to_string(&path)?;
        self.decode(&text)
    }

    fn exists(&self, name: &str) -> bool {
        self.file_path(name).exists()
    }
}
