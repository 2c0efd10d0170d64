//! Report Exporter Port - Rendering ranking and rating documents.
//!
//! A report is a small structured document: ordered classes of actions,
//! per-class credibility, correlation with the source relation and the
//! diagnostics raised while computing it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::StoreError;
use crate::domain::foundation::{ActionId, Diagnostic};
use crate::domain::valuation::OrdinalCorrelation;

/// What a report ranks or rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Ranking,
    Rating,
}

/// One ordered class of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportClass {
    /// 1-based position, best class first.
    pub rank: usize,
    pub members: Vec<ActionId>,
    /// Credibility that the class is placed correctly; absent when undefined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credibility: Option<Decimal>,
    /// Category interval of a rating class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<(usize, usize)>,
}

/// A ranking or rating document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub kind: ReportKind,
    pub tableau: String,
    pub strategy: String,
    /// SHA-256 fingerprint of the relation the report was computed from.
    pub source_fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub classes: Vec<ReportClass>,
    pub correlation: OrdinalCorrelation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_level: Option<Decimal>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    /// True when a diagnostic reports a degraded computation.
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Port for rendering reports.
pub trait ReportExporter: Send + Sync {
    /// Renders `report` as text.
    fn render(&self, report: &AnalysisReport) -> Result<String, StoreError>;

    /// Writes the rendered `report` to `path`.
    fn export(&self, report: &AnalysisReport, path: &Path) -> Result<(), StoreError> {
        let rendered = self.render(report)?;
        std::fs::write(path, rendered)?;
        Ok(())
    }
}
