//! Lazily computed artifacts owned by a digraph.

use once_cell::sync::OnceCell;

/// Dominant and absorbent neighborhoods of a node on the median cut.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gamma {
    /// Nodes `y` with `r(x, y) > Med`.
    pub dominant: Vec<usize>,
    /// Nodes `y` with `r(y, x) > Med`.
    pub absorbent: Vec<usize>,
}

/// Derived artifacts, reset wholesale on every relation mutation.
///
/// Cloning yields an empty cache.
#[derive(Debug, Default)]
pub(crate) struct DigraphCache {
    pub gamma: OnceCell<Vec<Gamma>>,
    pub strong_components: OnceCell<Vec<Vec<usize>>>,
    pub weak_components: OnceCell<Vec<Vec<usize>>>,
    pub fingerprint: OnceCell<String>,
}

impl DigraphCache {
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }
}

impl Clone for DigraphCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_clears_every_entry() {
        let mut cache = DigraphCache::default();
        cache.fingerprint.get_or_init(|| "abc".to_string());
        cache.strong_components.get_or_init(|| vec![vec![0]]);
        cache.invalidate();
        assert!(cache.fingerprint.get().is_none());
        assert!(cache.strong_components.get().is_none());
    }

    #[test]
    fn clones_start_empty() {
        let cache = DigraphCache::default();
        cache.gamma.get_or_init(Vec::new);
        assert!(cache.clone().gamma.get().is_none());
    }
}
