//! Digraph Store Port - Persisting bipolar-valued digraphs.

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::domain::digraph::BipolarDigraph;
use crate::domain::outranking::{OutrankingDigraph, VetoRecord};

/// A digraph with the veto record it was built with, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDigraph {
    pub digraph: BipolarDigraph,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vetoes: Option<VetoRecord>,
}

impl From<&OutrankingDigraph> for StoredDigraph {
    fn from(outranking: &OutrankingDigraph) -> Self {
        Self {
            digraph: outranking.digraph.clone(),
            vetoes: Some(outranking.vetoes.clone()),
        }
    }
}

/// Port for persisting digraphs under a name.
pub trait DigraphStore: Send + Sync {
    /// Saves `stored` under `name`.
    fn save(&self, name: &str, stored: &StoredDigraph) -> Result<(), StoreError>;

    /// Loads the digraph saved under `name`.
    ///
    /// # Errors
    /// `NotFound` when nothing was saved under `name`.
    fn load(&self, name: &str) -> Result<StoredDigraph, StoreError>;

    /// Returns true when a digraph was saved under `name`.
    fn exists(&self, name: &str) -> bool;
}
