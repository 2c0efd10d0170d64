//! Record of triggered and potential (weak) vetoes and counter-vetoes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::characteristics::CharacteristicTable;
use crate::domain::foundation::{ActionId, CriterionId};
use crate::domain::performance::{PerformanceTableau, ThresholdKind};

/// Veto state of one criterion on one ordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionVeto {
    pub criterion: CriterionId,
    /// +1 asserted, 0 weak.
    pub characteristic: Decimal,
    pub difference: Decimal,
    pub weak_veto: Option<Decimal>,
    pub veto: Option<Decimal>,
}

/// All veto-relevant criteria of one ordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetoEntry {
    pub source: ActionId,
    pub target: ActionId,
    /// Credibility of the pair before the vetoes were applied.
    pub concordance: Decimal,
    pub criteria: Vec<CriterionVeto>,
}

/// Vetoes and counter-vetoes recorded during construction, in pair order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VetoRecord {
    pub vetoes: Vec<VetoEntry>,
    pub counter_vetoes: Vec<VetoEntry>,
}

impl VetoRecord {
    /// Collects every criterion with a veto (or counter-veto) above -1.
    ///
    /// `concordance` yields the pre-veto credibility of a pair.
    pub(crate) fn collect<F>(
        tableau: &PerformanceTableau,
        table: &CharacteristicTable,
        with_counter_vetoes: bool,
        concordance: F,
    ) -> Self
    where
        F: Fn(usize, usize) -> Decimal,
    {
        let mut record = VetoRecord::default();
        let order = tableau.action_count();
        for x in 0..order {
            for y in 0..order {
                if x == y {
                    continue;
                }
                let pair = table.pair(x, y);
                let mut vetoes = Vec::new();
                let mut counter_vetoes = Vec::new();
                for (g, characteristic) in pair.iter().enumerate() {
                    let Some(c) = characteristic else {
                        continue;
                    };
                    let entry = |value: Decimal| CriterionVeto {
                        criterion: tableau.criteria()[g].id.clone(),
                        characteristic: value,
                        difference: c.difference,
                        weak_veto: tableau.threshold(g, ThresholdKind::WeakVeto, x, y),
                        veto: tableau.threshold(g, ThresholdKind::Veto, x, y),
                    };
                    if c.veto > Decimal::NEGATIVE_ONE {
                        vetoes.push(entry(c.veto));
                    }
                    if with_counter_vetoes && c.counter_veto > Decimal::NEGATIVE_ONE {
                        counter_vetoes.push(entry(c.counter_veto));
                    }
                }
                let source = tableau.actions()[x].id.clone();
                let target = tableau.actions()[y].id.clone();
                if !vetoes.is_empty() {
                    record.vetoes.push(VetoEntry {
                        source: source.clone(),
                        target: target.clone(),
                        concordance: concordance(x, y),
                        criteria: vetoes,
                    });
                }
                if !counter_vetoes.is_empty() {
                    record.counter_vetoes.push(VetoEntry {
                        source,
                        target,
                        concordance: concordance(x, y),
                        criteria: counter_vetoes,
                    });
                }
            }
        }
        record
    }

    /// Entries for pairs where at least one veto is asserted.
    pub fn asserted(&self) -> impl Iterator<Item = &VetoEntry> {
        self.vetoes
            .iter()
            .filter(|e| e.criteria.iter().any(|c| c.characteristic == Decimal::ONE))
    }

    /// Veto entry of an ordered pair, if any.
    pub fn veto_for(&self, source: &str, target: &str) -> Option<&VetoEntry> {
        self.vetoes
            .iter()
            .find(|e| e.source.as_str() == source && e.target.as_str() == target)
    }

    pub fn is_empty(&self) -> bool {
        self.vetoes.is_empty() && self.counter_vetoes.is_empty()
    }
}
