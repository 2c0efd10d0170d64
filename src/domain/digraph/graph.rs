//! Bipolar-valued digraph: a dense credibility matrix over a flat node list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

use super::cache::{DigraphCache, Gamma};
use crate::domain::foundation::{ActionId, OutrankingError, Precision};
use crate::domain::valuation::{
    omax, omin, ordinal_correlation, polarize, OrdinalCorrelation, PolarizationMode, ValuationDomain,
};

/// Whether a node stands for an action or for a collapsed group of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Original,
    Fictive,
}

/// A digraph node with the original actions it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigraphNode {
    pub id: ActionId,
    pub kind: NodeKind,
    /// Original actions represented; a single entry for original nodes.
    pub members: Vec<ActionId>,
}

impl DigraphNode {
    /// Node standing for one original action.
    pub fn original(id: ActionId) -> Self {
        Self {
            members: vec![id.clone()],
            id,
            kind: NodeKind::Original,
        }
    }

    /// Node standing for a collapsed group of original actions.
    pub fn fictive(id: ActionId, members: Vec<ActionId>) -> Self {
        Self {
            id,
            kind: NodeKind::Fictive,
            members,
        }
    }

    pub fn is_fictive(&self) -> bool {
        self.kind == NodeKind::Fictive
    }
}

/// Binary operator used to fuse several relations pairwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionOperator {
    #[default]
    OMin,
    OMax,
}

impl FusionOperator {
    /// Applies the operator to a list of credibilities.
    pub fn apply<I>(&self, med: Decimal, values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        match self {
            FusionOperator::OMin => omin(med, values),
            FusionOperator::OMax => omax(med, values),
        }
    }
}

/// Persisted form of a digraph, validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigraphRecord {
    name: String,
    domain: ValuationDomain,
    nodes: Vec<DigraphNode>,
    relation: Vec<Vec<Decimal>>,
}

/// Bipolar-valued digraph over a finite set of nodes.
///
/// `relation[x][y]` is the credibility of "x outranks y". Derived
/// artifacts are cached and dropped on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DigraphRecord", into = "DigraphRecord")]
pub struct BipolarDigraph {
    name: String,
    domain: ValuationDomain,
    nodes: Vec<DigraphNode>,
    relation: Vec<Vec<Decimal>>,
    index: HashMap<String, usize>,
    pub(crate) cache: DigraphCache,
}

impl BipolarDigraph {
    /// Creates a digraph, checking ids, matrix shape and value range.
    pub fn new(
        name: impl Into<String>,
        domain: ValuationDomain,
        nodes: Vec<DigraphNode>,
        relation: Vec<Vec<Decimal>>,
    ) -> Result<Self, OutrankingError> {
        let order = nodes.len();
        let mut index = HashMap::with_capacity(order);
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.to_string(), i).is_some() {
                return Err(OutrankingError::invalid_domain(format!(
                    "duplicate node '{}'",
                    node.id
                )));
            }
        }
        if relation.len() != order || relation.iter().any(|row| row.len() != order) {
            return Err(OutrankingError::invalid_domain(format!(
                "relation matrix is not {}x{}",
                order, order
            )));
        }
        if let Some(value) = relation.iter().flatten().find(|r| !domain.contains(**r)) {
            return Err(OutrankingError::invalid_domain(format!(
                "credibility {} lies outside {}",
                value, domain
            )));
        }
        Ok(Self {
            name: name.into(),
            domain,
            nodes,
            relation,
            index,
            cache: DigraphCache::default(),
        })
    }

    /// Creates a digraph over original actions.
    pub fn from_actions(
        name: impl Into<String>,
        domain: ValuationDomain,
        actions: Vec<ActionId>,
        relation: Vec<Vec<Decimal>>,
    ) -> Result<Self, OutrankingError> {
        let nodes = actions.into_iter().map(DigraphNode::original).collect();
        Self::new(name, domain, nodes, relation)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &ValuationDomain {
        &self.domain
    }

    pub fn nodes(&self) -> &[DigraphNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Node identifiers in index order.
    pub fn ids(&self) -> Vec<ActionId> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// Position of a node, if present.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The relation matrix.
    pub fn relation(&self) -> &[Vec<Decimal>] {
        &self.relation
    }

    /// Credibility of "x outranks y" by index.
    pub fn value(&self, x: usize, y: usize) -> Decimal {
        self.relation[x][y]
    }

    /// Credibility of "x outranks y" by identifier.
    pub fn credibility(&self, x: &str, y: &str) -> Option<Decimal> {
        Some(self.relation[self.node_index(x)?][self.node_index(y)?])
    }

    /// True when the median cut holds an arc x -> y.
    pub fn arc(&self, x: usize, y: usize) -> bool {
        x != y && self.relation[x][y] > self.domain.med()
    }

    /// Sets one credibility and invalidates every cached artifact.
    pub fn set_value(&mut self, x: usize, y: usize, r: Decimal) -> Result<(), OutrankingError> {
        let order = self.order();
        if x >= order || y >= order {
            return Err(OutrankingError::invalid_domain(format!(
                "pair ({}, {}) lies outside a digraph of order {}",
                x, y, order
            )));
        }
        if !self.domain.contains(r) {
            return Err(OutrankingError::invalid_domain(format!(
                "credibility {} lies outside {}",
                r, self.domain
            )));
        }
        self.relation[x][y] = r;
        self.cache.invalidate();
        Ok(())
    }

    /// Original actions covered by the given nodes, in node order.
    pub fn expand(&self, nodes: &[usize]) -> Vec<ActionId> {
        nodes
            .iter()
            .flat_map(|&x| self.nodes[x].members.iter().cloned())
            .collect()
    }

    /// Dominant and absorbent neighborhoods of every node.
    pub fn gamma(&self) -> &[Gamma] {
        self.cache.gamma.get_or_init(|| {
            (0..self.order())
                .map(|x| Gamma {
                    dominant: (0..self.order()).filter(|&y| self.arc(x, y)).collect(),
                    absorbent: (0..self.order()).filter(|&y| self.arc(y, x)).collect(),
                })
                .collect()
        })
    }

    /// SHA-256 hex digest of (domain, node ids, relation).
    pub fn fingerprint(&self) -> &str {
        self.cache.fingerprint.get_or_init(|| {
            let mut hasher = Sha256::new();
            hasher.update(self.domain.to_string().as_bytes());
            for node in &self.nodes {
                hasher.update(node.id.as_str().as_bytes());
                hasher.update([0u8]);
            }
            for value in self.relation.iter().flatten() {
                hasher.update(value.normalize().to_string().as_bytes());
                hasher.update([0u8]);
            }
            hasher
                .finalize()
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect()
        })
    }

    fn derived(&self, name: String, relation: Vec<Vec<Decimal>>) -> Self {
        Self {
            name,
            domain: self.domain,
            nodes: self.nodes.clone(),
            relation,
            index: self.index.clone(),
            cache: DigraphCache::default(),
        }
    }

    /// Negated relation: `¬r(x, y)` off the diagonal.
    pub fn negation(&self) -> Self {
        let relation = self.map_pairs(|x, y| {
            if x == y {
                self.relation[x][y]
            } else {
                self.domain.negate(self.relation[x][y])
            }
        });
        self.derived(format!("not-{}", self.name), relation)
    }

    /// Transposed relation: `r(y, x)` off the diagonal.
    pub fn converse(&self) -> Self {
        let relation = self.map_pairs(|x, y| {
            if x == y {
                self.relation[x][y]
            } else {
                self.relation[y][x]
            }
        });
        self.derived(format!("converse-{}", self.name), relation)
    }

    /// Negated converse: `¬r(y, x)` off the diagonal; the diagonal is kept.
    pub fn codual(&self) -> Self {
        let relation = self.map_pairs(|x, y| {
            if x == y {
                self.relation[x][y]
            } else {
                self.domain.negate(self.relation[y][x])
            }
        });
        self.derived(format!("codual-{}", self.name), relation)
    }

    /// Epistemic polarization of every credibility at `level`.
    pub fn polarized(&self, level: Decimal, mode: PolarizationMode) -> Self {
        let relation = self.map_pairs(|x, y| polarize(&self.domain, self.relation[x][y], level, mode));
        self.derived(format!("polarized-{}", self.name), relation)
    }

    /// Sub-digraph induced by the given node indices, in the given order.
    pub fn restricted(&self, nodes: &[usize]) -> Self {
        let kept: Vec<DigraphNode> = nodes.iter().map(|&x| self.nodes[x].clone()).collect();
        let relation = nodes
            .iter()
            .map(|&x| nodes.iter().map(|&y| self.relation[x][y]).collect())
            .collect();
        let index = kept
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.to_string(), i))
            .collect();
        Self {
            name: self.name.clone(),
            domain: self.domain,
            nodes: kept,
            relation,
            index,
            cache: DigraphCache::default(),
        }
    }

    /// Sub-digraph induced by the given node identifiers.
    pub fn restricted_to(&self, ids: &[ActionId]) -> Result<Self, OutrankingError> {
        let nodes = ids
            .iter()
            .map(|id| {
                self.node_index(id.as_str()).ok_or_else(|| {
                    OutrankingError::invalid_domain(format!("unknown node '{}'", id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.restricted(&nodes))
    }

    /// Copy of this digraph recoded affinely onto `target`.
    pub fn recoded(&self, target: ValuationDomain, precision: Precision) -> Self {
        let mut recoded = self.clone();
        recoded.recode_valuation(target, precision);
        recoded
    }

    /// Recodes the relation in place onto `target`, preserving signs and order.
    pub fn recode_valuation(&mut self, target: ValuationDomain, precision: Precision) {
        let source = self.domain;
        for row in &mut self.relation {
            for r in row.iter_mut() {
                *r = source.recode(*r, &target, precision);
            }
        }
        self.domain = target;
        self.cache.invalidate();
    }

    /// Pairwise fusion of this relation with others on the same nodes and domain.
    pub fn fusion(&self, others: &[&BipolarDigraph], operator: FusionOperator) -> Result<Self, OutrankingError> {
        let mut aligned = Vec::with_capacity(others.len());
        for other in others {
            self.domain.ensure_same(&other.domain)?;
            aligned.push(other.aligned_to(self)?);
        }
        let med = self.domain.med();
        let relation = self.map_pairs(|x, y| {
            if x == y {
                return self.relation[x][y];
            }
            let values = std::iter::once(self.relation[x][y]).chain(aligned.iter().map(|m| m[x][y]));
            operator.apply(med, values)
        });
        Ok(self.derived(format!("fusion-{}", self.name), relation))
    }

    /// Ordinal correlation of this relation with `other` on the same node set.
    pub fn correlation(&self, other: &BipolarDigraph, precision: Precision) -> Result<OrdinalCorrelation, OutrankingError> {
        let aligned = other.aligned_to(self)?;
        ordinal_correlation(&self.domain, &self.relation, &other.domain, &aligned, precision)
    }

    /// This relation reindexed in the node order of `reference`.
    fn aligned_to(&self, reference: &BipolarDigraph) -> Result<Vec<Vec<Decimal>>, OutrankingError> {
        if self.order() != reference.order() {
            return Err(OutrankingError::invalid_domain(format!(
                "node sets differ in size ({} and {})",
                self.order(),
                reference.order()
            )));
        }
        let positions = reference
            .nodes
            .iter()
            .map(|n| {
                self.node_index(n.id.as_str()).ok_or_else(|| {
                    OutrankingError::invalid_domain(format!("node '{}' is missing", n.id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(positions
            .iter()
            .map(|&x| positions.iter().map(|&y| self.relation[x][y]).collect())
            .collect())
    }

    fn map_pairs<F>(&self, f: F) -> Vec<Vec<Decimal>>
    where
        F: Fn(usize, usize) -> Decimal,
    {
        (0..self.order())
            .map(|x| (0..self.order()).map(|y| f(x, y)).collect())
            .collect()
    }

    /// True when every node is an original action exactly once.
    pub fn covers_originals_once(&self) -> bool {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .flat_map(|n| n.members.iter())
            .all(|m| seen.insert(m.as_str()))
    }
}

impl PartialEq for BipolarDigraph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.domain == other.domain
            && self.nodes == other.nodes
            && self.relation == other.relation
    }
}

impl TryFrom<DigraphRecord> for BipolarDigraph {
    type Error = OutrankingError;

    fn try_from(record: DigraphRecord) -> Result<Self, Self::Error> {
        Self::new(record.name, record.domain, record.nodes, record.relation)
    }
}

impl From<BipolarDigraph> for DigraphRecord {
    fn from(digraph: BipolarDigraph) -> Self {
        Self {
            name: digraph.name,
            domain: digraph.domain,
            nodes: digraph.nodes,
            relation: digraph.relation,
        }
    }
}
