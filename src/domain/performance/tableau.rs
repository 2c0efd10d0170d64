//! Performance tableau: actions evaluated on weighted, thresholded criteria.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use super::{Action, Criterion, Evaluation, Objective, ThresholdKind};
use crate::domain::foundation::OutrankingError;

/// Validated performance tableau.
///
/// Evaluations are stored sign-adjusted (`sign * e`, sign = -1 for
/// minimized criteria) so larger is always better downstream. Original
/// values remain available through [`PerformanceTableau::original_evaluation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceTableau {
    name: String,
    actions: Vec<Action>,
    objectives: Vec<Objective>,
    criteria: Vec<Criterion>,
    /// Signed evaluations indexed `[criterion][action]`.
    evaluations: Vec<Vec<Evaluation>>,
    action_index: HashMap<String, usize>,
    criterion_index: HashMap<String, usize>,
}

impl PerformanceTableau {
    /// Creates a builder for constructing a tableau.
    pub fn builder() -> PerformanceTableauBuilder {
        PerformanceTableauBuilder::new()
    }

    /// Returns a builder pre-filled with this tableau's content.
    pub fn to_builder(&self) -> PerformanceTableauBuilder {
        let mut builder = PerformanceTableauBuilder::new().name(self.name.clone());
        for action in &self.actions {
            builder = builder.action(action.clone());
        }
        for criterion in &self.criteria {
            builder = builder.criterion(criterion.clone());
        }
        for objective in &self.objectives {
            builder = builder.objective(objective.clone());
        }
        for (g, criterion) in self.criteria.iter().enumerate() {
            for (x, action) in self.actions.iter().enumerate() {
                builder = builder.evaluation(&criterion.id, &action.id, self.original_evaluation(g, x));
            }
        }
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Position of an action, if present.
    pub fn action_index(&self, id: &str) -> Option<usize> {
        self.action_index.get(id).copied()
    }

    /// Position of a criterion, if present.
    pub fn criterion_index(&self, id: &str) -> Option<usize> {
        self.criterion_index.get(id).copied()
    }

    /// Sign-adjusted evaluation of action `x` on criterion `g`.
    pub fn evaluation(&self, g: usize, x: usize) -> Evaluation {
        self.evaluations[g][x]
    }

    /// Evaluation of action `x` on criterion `g` in the criterion's own orientation.
    pub fn original_evaluation(&self, g: usize, x: usize) -> Evaluation {
        self.evaluations[g][x].signed(self.criteria[g].direction.sign())
    }

    /// Sum of all criteria weights.
    pub fn total_weight(&self) -> Decimal {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Symmetric threshold of `kind` for the pair (x, y) on criterion `g`.
    ///
    /// Returns `None` when the kind is not defined or an evaluation is missing.
    pub fn threshold(&self, g: usize, kind: ThresholdKind, x: usize, y: usize) -> Option<Decimal> {
        let threshold = self.criteria[g].threshold(kind)?;
        let ex = self.evaluation(g, x).value()?;
        let ey = self.evaluation(g, y).value()?;
        Some(threshold.symmetric(ex, ey))
    }

    /// Asymmetric threshold of `kind` anchored on action `x`.
    pub fn asymmetric_threshold(&self, g: usize, kind: ThresholdKind, x: usize) -> Option<Decimal> {
        let threshold = self.criteria[g].threshold(kind)?;
        let ex = self.evaluation(g, x).value()?;
        Some(threshold.asymmetric(ex))
    }

    /// Share of actions performing at most as well as `x` on `g`, up to indifference.
    ///
    /// Only actions with a present evaluation are counted. Returns `None`
    /// when the evaluation of `x` is missing.
    pub fn quantile(&self, g: usize, x: usize) -> Option<Decimal> {
        let ex = self.evaluation(g, x).value()?;
        let ind = self
            .asymmetric_threshold(g, ThresholdKind::Indifference, x)
            .unwrap_or(Decimal::ZERO);
        let mut present = 0u32;
        let mut below = 0u32;
        for e in self.evaluations[g].iter().filter_map(|e| e.value()) {
            present += 1;
            if e <= ex + ind {
                below += 1;
            }
        }
        Some(Decimal::from(below) / Decimal::from(present))
    }

    /// Sorted absolute performance differences over unordered pairs on `g`.
    pub fn performance_differences(&self, g: usize) -> Vec<Decimal> {
        let present: Vec<Decimal> = self.evaluations[g].iter().filter_map(|e| e.value()).collect();
        let mut differences = Vec::with_capacity(present.len() * present.len() / 2);
        for (i, a) in present.iter().enumerate() {
            for b in &present[i + 1..] {
                differences.push((*a - *b).abs());
            }
        }
        differences.sort();
        differences
    }

    /// Tableau restricted to the given actions, in the given order.
    pub fn restricted(&self, action_ids: &[&str]) -> Result<Self, OutrankingError> {
        let mut builder = PerformanceTableauBuilder::new().name(self.name.clone());
        for criterion in &self.criteria {
            builder = builder.criterion(criterion.clone());
        }
        for objective in &self.objectives {
            builder = builder.objective(objective.clone());
        }
        for id in action_ids {
            let x = self.action_index(id).ok_or_else(|| {
                OutrankingError::invalid_tableau(format!("unknown action '{}'", id))
            })?;
            builder = builder.action(self.actions[x].clone());
            for (g, criterion) in self.criteria.iter().enumerate() {
                builder = builder.evaluation(&criterion.id, id, self.original_evaluation(g, x));
            }
        }
        builder.build()
    }

    /// Replaces criteria in place, keeping evaluations; revalidates.
    pub(crate) fn with_criteria(&self, criteria: Vec<Criterion>) -> Result<Self, OutrankingError> {
        let mut tableau = self.clone();
        for criterion in &criteria {
            criterion.validate()?;
        }
        tableau.criteria = criteria;
        Ok(tableau)
    }
}

/// Builder for constructing validated [`PerformanceTableau`] instances.
#[derive(Debug, Default)]
pub struct PerformanceTableauBuilder {
    name: String,
    actions: Vec<Action>,
    objectives: Vec<Objective>,
    criteria: Vec<Criterion>,
    evaluations: Vec<(String, String, Evaluation)>,
}

impl PerformanceTableauBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            name: "performance tableau".to_string(),
            ..Self::default()
        }
    }

    /// Sets the tableau name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds an objective.
    pub fn objective(mut self, objective: Objective) -> Self {
        self.objectives.push(objective);
        self
    }

    /// Adds a criterion.
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Sets the evaluation of an action on a criterion, in the criterion's orientation.
    pub fn evaluation(
        mut self,
        criterion_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        value: impl Into<Evaluation>,
    ) -> Self {
        self.evaluations.push((
            criterion_id.as_ref().to_string(),
            action_id.as_ref().to_string(),
            value.into(),
        ));
        self
    }

    /// Validates and builds the tableau.
    ///
    /// # Errors
    ///
    /// - `InvalidTableau` for empty action or criteria sets, duplicate ids,
    ///   unknown references or threshold violations
    /// - `EmptyCoalition` when every criterion weight is zero
    pub fn build(self) -> Result<PerformanceTableau, OutrankingError> {
        if self.actions.is_empty() {
            return Err(OutrankingError::invalid_tableau("no actions"));
        }
        if self.criteria.is_empty() {
            return Err(OutrankingError::invalid_tableau("no criteria"));
        }

        let mut action_index = HashMap::with_capacity(self.actions.len());
        for (i, action) in self.actions.iter().enumerate() {
            if action_index.insert(action.id.to_string(), i).is_some() {
                return Err(OutrankingError::invalid_tableau(format!(
                    "duplicate action '{}'",
                    action.id
                )));
            }
        }

        let mut criterion_index = HashMap::with_capacity(self.criteria.len());
        for (i, criterion) in self.criteria.iter().enumerate() {
            if criterion_index.insert(criterion.id.to_string(), i).is_some() {
                return Err(OutrankingError::invalid_tableau(format!(
                    "duplicate criterion '{}'",
                    criterion.id
                )));
            }
            criterion.validate()?;
        }

        let mut objective_ids = HashSet::new();
        for objective in &self.objectives {
            if !objective_ids.insert(objective.id.as_str()) {
                return Err(OutrankingError::invalid_tableau(format!(
                    "duplicate objective '{}'",
                    objective.id
                )));
            }
            if let Some(unknown) = objective
                .criteria
                .iter()
                .find(|c| !criterion_index.contains_key(c.as_str()))
            {
                return Err(OutrankingError::invalid_tableau(format!(
                    "objective '{}' references unknown criterion '{}'",
                    objective.id, unknown
                )));
            }
        }

        if self.criteria.iter().all(|c| c.weight.is_zero()) {
            return Err(OutrankingError::EmptyCoalition);
        }

        let mut evaluations = vec![vec![Evaluation::Missing; self.actions.len()]; self.criteria.len()];
        for (criterion_id, action_id, value) in self.evaluations {
            let g = *criterion_index.get(&criterion_id).ok_or_else(|| {
                OutrankingError::invalid_tableau(format!(
                    "evaluation references unknown criterion '{}'",
                    criterion_id
                ))
            })?;
            let x = *action_index.get(&action_id).ok_or_else(|| {
                OutrankingError::invalid_tableau(format!(
                    "evaluation references unknown action '{}'",
                    action_id
                ))
            })?;
            evaluations[g][x] = value.signed(self.criteria[g].direction.sign());
        }

        Ok(PerformanceTableau {
            name: self.name,
            actions: self.actions,
            objectives: self.objectives,
            criteria: self.criteria,
            evaluations,
            action_index,
            criterion_index,
        })
    }
}
