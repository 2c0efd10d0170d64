//! Kernel enumeration by component-wise Bron-Kerbosch over independent sets.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ActionId, ComputeContext, OutrankingError};

/// Default maximum number of branch steps per component.
pub const DEFAULT_STEP_BUDGET: u64 = 1_000_000;

/// Direction of external stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    /// Every outsider is outranked by some member.
    Dominant,
    /// Every outsider outranks some member.
    Absorbent,
}

/// An independent and externally stable choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kernel {
    pub kind: KernelKind,
    /// Sorted node indices.
    pub nodes: Vec<usize>,
    /// Original actions covered, fictive nodes expanded.
    pub members: Vec<ActionId>,
    pub credibility: Decimal,
}

/// Branch-and-bound state over one weak component.
struct ComponentSearch<'a> {
    digraph: &'a BipolarDigraph,
    kind: KernelKind,
    component: &'a [usize],
    budget: u64,
    steps: u64,
    found: Vec<Vec<usize>>,
}

impl ComponentSearch<'_> {
    fn conflict(&self, x: usize, y: usize) -> bool {
        x != y && (self.digraph.arc(x, y) || self.digraph.arc(y, x))
    }

    /// True when `x` covers `z` in the direction of the search.
    fn covers(&self, x: usize, z: usize) -> bool {
        match self.kind {
            KernelKind::Dominant => self.digraph.arc(x, z),
            KernelKind::Absorbent => self.digraph.arc(z, x),
        }
    }

    fn covered(&self, choice: &[usize], z: usize) -> bool {
        choice.iter().any(|&x| self.covers(x, z))
    }

    /// Some outsider can no longer be covered nor added.
    fn hopeless(&self, choice: &[usize], candidates: &[usize]) -> bool {
        self.component.iter().any(|&z| {
            !choice.contains(&z)
                && !candidates.contains(&z)
                && !self.covered(choice, z)
                && !candidates.iter().any(|&v| self.covers(v, z))
        })
    }

    fn search(&mut self, choice: &mut Vec<usize>, candidates: Vec<usize>, excluded: Vec<usize>) -> Result<(), OutrankingError> {
        self.steps += 1;
        if self.steps > self.budget {
            return Err(OutrankingError::KernelEnumerationTimeout { budget: self.budget });
        }
        if candidates.is_empty() && excluded.is_empty() {
            if self.component.iter().all(|&z| choice.contains(&z) || self.covered(choice, z)) {
                let mut kernel = choice.clone();
                kernel.sort_unstable();
                self.found.push(kernel);
            }
            return Ok(());
        }
        if self.hopeless(choice, &candidates) {
            return Ok(());
        }

        // Pivot with the most conflicts among the candidates.
        let pivot = candidates
            .iter()
            .chain(excluded.iter())
            .copied()
            .max_by_key(|&u| (candidates.iter().filter(|&&v| self.conflict(u, v)).count(), std::cmp::Reverse(u)));
        let branches: Vec<usize> = match pivot {
            Some(u) => candidates
                .iter()
                .copied()
                .filter(|&v| v == u || self.conflict(u, v))
                .collect(),
            None => candidates.clone(),
        };

        let mut candidates = candidates;
        let mut excluded = excluded;
        for v in branches {
            choice.push(v);
            let next_candidates = candidates.iter().copied().filter(|&w| w != v && !self.conflict(v, w)).collect();
            let next_excluded = excluded.iter().copied().filter(|&w| !self.conflict(v, w)).collect();
            self.search(choice, next_candidates, next_excluded)?;
            choice.pop();
            candidates.retain(|&w| w != v);
            excluded.push(v);
        }
        Ok(())
    }
}

impl BipolarDigraph {
    /// Enumerates all dominant or absorbent kernels of the median cut.
    ///
    /// Weak components are searched independently and their kernels
    /// combined. `budget` bounds both the branch steps per component and
    /// the number of combined kernels.
    ///
    /// # Errors
    ///
    /// - `KernelEnumerationTimeout` when the budget is exhausted
    /// - `Cancelled` when the context is cancelled
    pub fn kernels(&self, kind: KernelKind, budget: u64, ctx: &ComputeContext) -> Result<Vec<Kernel>, OutrankingError> {
        let per_component = self
            .weak_components()
            .par_iter()
            .map(|component| {
                ctx.check()?;
                let mut search = ComponentSearch {
                    digraph: self,
                    kind,
                    component,
                    budget,
                    steps: 0,
                    found: Vec::new(),
                };
                search.search(&mut Vec::new(), component.clone(), Vec::new())?;
                let mut found = search.found;
                found.sort();
                Ok(found)
            })
            .collect::<Result<Vec<_>, OutrankingError>>()?;

        let mut combined: Vec<Vec<usize>> = vec![Vec::new()];
        for kernels in &per_component {
            let size = (combined.len() as u64).saturating_mul(kernels.len() as u64);
            if size > budget {
                return Err(OutrankingError::KernelEnumerationTimeout { budget });
            }
            combined = combined
                .iter()
                .flat_map(|prefix| {
                    kernels.iter().map(move |k| {
                        let mut nodes = prefix.clone();
                        nodes.extend(k);
                        nodes
                    })
                })
                .collect();
        }

        let mut kernels: Vec<Kernel> = combined
            .into_iter()
            .map(|mut nodes| {
                nodes.sort_unstable();
                Kernel {
                    kind,
                    members: self.expand(&nodes),
                    credibility: self.choice_credibility(&nodes, kind),
                    nodes,
                }
            })
            .collect();
        kernels.sort_by(|a, b| a.nodes.cmp(&b.nodes));
        tracing::debug!(digraph = self.name(), ?kind, kernels = kernels.len(), "kernels enumerated");
        Ok(kernels)
    }
}
