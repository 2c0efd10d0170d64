//! File-backed tableau store using the text format.

use std::fs;
use std::path::Path;

use super::text_format::{format_tableau, parse_tableau};
use crate::domain::performance::PerformanceTableau;
use crate::ports::{StoreError, TableauStore};

/// Reads and writes tableaux as text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTableauStore;

impl TextTableauStore {
    pub fn new() -> Self {
        Self
    }
}

impl TableauStore for TextTableauStore {
    fn load(&self, path: &Path) -> Result<PerformanceTableau, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(format!("tableau file {}", path.display())));
        }
        let text = fs::read_to_string(path)?;
        let tableau = parse_tableau(&text)?;
        tracing::debug!(
            path = %path.display(),
            actions = tableau.action_count(),
            criteria = tableau.criterion_count(),
            "tableau loaded"
        );
        Ok(tableau)
    }

    fn save(&self, tableau: &PerformanceTableau, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Atomic replace through a sibling temp file.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, format_tableau(tableau))?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}
