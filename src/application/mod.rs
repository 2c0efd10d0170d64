//! Application layer - Pipelines composing domain services and ports.

mod pipeline;
mod report;

pub use pipeline::{AnalysisCommand, AnalysisMode, AnalysisPipeline};
pub use report::{ranking_report, rating_report, RankingReportInput};
