//! Chordless circuit enumeration on the median cut.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ActionId, ComputeContext, OutrankingError};

/// Default cap on reported circuits.
pub const DEFAULT_CIRCUIT_CAP: usize = 100_000;

/// A directed circuit of the median cut without chords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordlessCircuit {
    /// Node indices in circuit order, smallest index first.
    pub nodes: Vec<usize>,
    pub members: Vec<ActionId>,
    /// Credibility of the weakest arc along the circuit.
    pub credibility: Decimal,
}

impl ChordlessCircuit {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Odd circuits are the obstruction to kernel existence.
    pub fn is_odd(&self) -> bool {
        self.nodes.len() % 2 == 1
    }
}

/// Depth-first enumerator over one digraph.
struct Enumerator<'a> {
    digraph: &'a BipolarDigraph,
    cap: usize,
    seen: HashSet<Vec<usize>>,
    found: Vec<Vec<usize>>,
}

impl Enumerator<'_> {
    fn adjacent(&self, x: usize, y: usize) -> bool {
        self.digraph.arc(x, y) || self.digraph.arc(y, x)
    }

    /// Extends `path` (rooted at its smallest node) with successors of its last node.
    fn extend(&mut self, path: &mut Vec<usize>) -> Result<(), OutrankingError> {
        let (start, last) = (path[0], path[path.len() - 1]);
        let successors: Vec<usize> = self.digraph.gamma()[last]
            .dominant
            .iter()
            .copied()
            .filter(|&w| w > start && !path.contains(&w))
            .collect();
        for w in successors {
            let interior: &[usize] = if path.len() > 2 { &path[1..path.len() - 1] } else { &[] };
            if interior.iter().any(|&p| self.adjacent(w, p)) {
                continue;
            }
            // A symmetric pair on the first arc is a 2-cycle, not a chord.
            if path.len() >= 2 && self.digraph.arc(w, start) {
                let mut circuit = path.clone();
                circuit.push(w);
                self.record(circuit)?;
                continue;
            }
            if path.len() >= 2 && self.digraph.arc(start, w) {
                continue;
            }
            path.push(w);
            self.extend(path)?;
            path.pop();
        }
        Ok(())
    }

    fn record(&mut self, circuit: Vec<usize>) -> Result<(), OutrankingError> {
        if self.seen.insert(canonical_rotation(&circuit)) {
            self.found.push(circuit);
            if self.found.len() > self.cap {
                return Err(OutrankingError::CircuitEnumerationOverflow { cap: self.cap });
            }
        }
        Ok(())
    }
}

/// Rotation of `circuit` starting at its smallest node.
fn canonical_rotation(circuit: &[usize]) -> Vec<usize> {
    let pivot = circuit
        .iter()
        .enumerate()
        .min_by_key(|(_, x)| **x)
        .map_or(0, |(i, _)| i);
    circuit[pivot..].iter().chain(&circuit[..pivot]).copied().collect()
}

impl BipolarDigraph {
    /// Enumerates chordless circuits of length >= 3 of the median cut.
    ///
    /// # Errors
    ///
    /// - `CircuitEnumerationOverflow` when more than `cap` circuits exist
    /// - `Cancelled` when the context is cancelled
    pub fn chordless_circuits(
        &self,
        cap: usize,
        ctx: &ComputeContext,
    ) -> Result<Vec<ChordlessCircuit>, OutrankingError> {
        let mut enumerator = Enumerator {
            digraph: self,
            cap,
            seen: HashSet::new(),
            found: Vec::new(),
        };
        for start in 0..self.order() {
            ctx.check()?;
            let mut path = vec![start];
            enumerator.extend(&mut path)?;
        }
        let ids = self.ids();
        let circuits: Vec<ChordlessCircuit> = enumerator
            .found
            .into_iter()
            .map(|nodes| {
                let credibility = nodes
                    .iter()
                    .zip(nodes.iter().cycle().skip(1))
                    .map(|(&x, &y)| self.value(x, y))
                    .min()
                    .unwrap_or(self.domain().med());
                ChordlessCircuit {
                    members: nodes.iter().map(|&x| ids[x].clone()).collect(),
                    nodes,
                    credibility,
                }
            })
            .collect();
        tracing::debug!(digraph = self.name(), circuits = circuits.len(), "chordless circuits enumerated");
        Ok(circuits)
    }

    /// Only the odd chordless circuits.
    pub fn odd_chordless_circuits(
        &self,
        cap: usize,
        ctx: &ComputeContext,
    ) -> Result<Vec<ChordlessCircuit>, OutrankingError> {
        Ok(self
            .chordless_circuits(cap, ctx)?
            .into_iter()
            .filter(ChordlessCircuit::is_odd)
            .collect())
    }
}
