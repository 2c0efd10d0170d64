//! Decision alternatives and objectives.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActionId, CriterionId, ObjectiveId};

/// A decision alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub name: String,
    pub comment: String,
}

impl Action {
    /// Creates an action named after its identifier.
    pub fn new(id: ActionId) -> Self {
        Self {
            name: id.to_string(),
            id,
            comment: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Named grouping of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub name: String,
    pub criteria: Vec<CriterionId>,
}

impl Objective {
    /// Creates an objective over the given criteria.
    pub fn new(id: ObjectiveId, criteria: Vec<CriterionId>) -> Self {
        Self {
            name: id.to_string(),
            id,
            criteria,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
