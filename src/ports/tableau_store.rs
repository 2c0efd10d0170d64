//! Tableau Store Port - Loading and saving performance tableaux.

use std::path::Path;

use super::StoreError;
use crate::domain::performance::PerformanceTableau;

/// Port for reading and writing performance tableaux.
///
/// Implementations must round-trip losslessly: saving a tableau and loading
/// it back yields an equal tableau.
pub trait TableauStore: Send + Sync {
    /// Loads the tableau stored at `path`.
    ///
    /// # Errors
    /// `NotFound` for a missing file, `ParseFailed` for malformed content
    /// and `Domain` when the content describes an invalid tableau.
    fn load(&self, path: &Path) -> Result<PerformanceTableau, StoreError>;

    /// Writes `tableau` to `path`, replacing any previous content.
    fn save(&self, tableau: &PerformanceTableau, path: &Path) -> Result<(), StoreError>;
}
