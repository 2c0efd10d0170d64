//! Assembly of analysis reports from domain artifacts.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ActionId, Diagnostic};
use crate::domain::ranking::WeakOrder;
use crate::domain::rating::RatingBySorting;
use crate::domain::valuation::OrdinalCorrelation;
use crate::ports::{AnalysisReport, ReportClass, ReportKind};

/// Inputs of a ranking report.
pub struct RankingReportInput<'a> {
    pub tableau: &'a str,
    pub strategy: &'a str,
    pub source: &'a BipolarDigraph,
    pub order: &'a WeakOrder,
    pub correlation: OrdinalCorrelation,
    pub cut_level: Option<Decimal>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the report of a ranking; each class carries the weakest
/// credibility with which its members outrank the lower classes.
pub fn ranking_report(input: RankingReportInput<'_>) -> AnalysisReport {
    let classes = input
        .order
        .classes
        .iter()
        .enumerate()
        .map(|(rank, members)| ReportClass {
            rank: rank + 1,
            members: members.clone(),
            credibility: class_credibility(input.source, members, &input.order.classes[rank + 1..]),
            categories: None,
        })
        .collect();
    AnalysisReport {
        kind: ReportKind::Ranking,
        tableau: input.tableau.to_string(),
        strategy: input.strategy.to_string(),
        source_fingerprint: input.source.fingerprint().to_string(),
        generated_at: Utc::now(),
        classes,
        correlation: input.correlation,
        cut_level: input.cut_level,
        diagnostics: input.diagnostics,
    }
}

/// Builds the report of a rating.
pub fn rating_report(tableau: &str, strategy: &str, rating: &RatingBySorting) -> AnalysisReport {
    let classes = rating
        .classes
        .iter()
        .enumerate()
        .map(|(rank, class)| ReportClass {
            rank: rank + 1,
            members: class.members.clone(),
            credibility: Some(class.credibility),
            categories: Some((class.low_category, class.high_category)),
        })
        .collect();
    AnalysisReport {
        kind: ReportKind::Rating,
        tableau: tableau.to_string(),
        strategy: strategy.to_string(),
        source_fingerprint: rating.source_fingerprint.clone(),
        generated_at: Utc::now(),
        classes,
        correlation: rating.correlation,
        cut_level: None,
        diagnostics: Vec::new(),
    }
}

fn class_credibility(source: &BipolarDigraph, class: &[ActionId], lower: &[Vec<ActionId>]) -> Option<Decimal> {
    class
        .iter()
        .flat_map(|x| lower.iter().flatten().map(move |y| (x, y)))
        .filter_map(|(x, y)| source.credibility(x.as_str(), y.as_str()))
        .min()
}
