//! AnalysisPipeline - Tableau to ranking or rating report.
//!
//! Loads a tableau through the `TableauStore` port, builds the configured
//! outranking relation, exploits it and renders the report through the
//! `ReportExporter` port.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::report::{ranking_report, rating_report, RankingReportInput};
use crate::config::AnalysisConfig;
use crate::domain::foundation::{CancellationToken, ComputeContext, OutrankingError};
use crate::domain::outranking::OutrankingConstructor;
use crate::domain::performance::PerformanceTableau;
use crate::domain::ranking::{PrudentRanking, RankingByChoosing};
use crate::domain::rating::RatingBySorting;
use crate::ports::{AnalysisReport, ReportExporter, TableauStore};

/// What to compute from a tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Rank,
    Rate,
}

impl FromStr for AnalysisMode {
    type Err = OutrankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rank" => Ok(AnalysisMode::Rank),
            "rate" => Ok(AnalysisMode::Rate),
            other => Err(OutrankingError::invalid_tableau(format!(
                "unknown analysis mode '{}', expected 'rank' or 'rate'",
                other
            ))),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Rank => write!(f, "rank"),
            AnalysisMode::Rate => write!(f, "rate"),
        }
    }
}

/// Command for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCommand {
    pub tableau_path: PathBuf,
    pub mode: AnalysisMode,
}

/// Composes the domain services behind the binary.
pub struct AnalysisPipeline {
    tableaux: Arc<dyn TableauStore>,
    exporter: Arc<dyn ReportExporter>,
    config: AnalysisConfig,
    cancellation: Option<CancellationToken>,
}

impl AnalysisPipeline {
    pub fn new(tableaux: Arc<dyn TableauStore>, exporter: Arc<dyn ReportExporter>, config: AnalysisConfig) -> Self {
        Self {
            tableaux,
            exporter,
            config,
            cancellation: None,
        }
    }

    /// Attaches a token checked throughout the computation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Loads, analyzes and renders; the result is the rendered report.
    pub fn run(&self, command: &AnalysisCommand) -> Result<String, OutrankingError> {
        let report = self.analyze(&command.tableau_path, command.mode)?;
        Ok(self.exporter.render(&report)?)
    }

    /// Loads the tableau at `path` and computes the report of `mode`.
    pub fn analyze(&self, path: &Path, mode: AnalysisMode) -> Result<AnalysisReport, OutrankingError> {
        let tableau = self.tableaux.load(path)?;
        info!(
            tableau = tableau.name(),
            actions = tableau.action_count(),
            criteria = tableau.criterion_count(),
            %mode,
            "tableau loaded"
        );
        match mode {
            AnalysisMode::Rank => self.rank(&tableau),
            AnalysisMode::Rate => self.rate(&tableau),
        }
    }

    /// Ranking report of `tableau`, through the prudent cut when configured.
    pub fn rank(&self, tableau: &PerformanceTableau) -> Result<AnalysisReport, OutrankingError> {
        let ctx = self.context();
        let strategy = self.config.strategy();
        let settings = self.config.ranking_settings();

        let outranking = OutrankingConstructor::construct(tableau, &strategy, &ctx)?;
        let digraph = &outranking.digraph;
        info!(strategy = strategy.label(), arcs = digraph.size(), "outranking relation built");

        let (ranking, cut_level, diagnostics) = if self.config.ranking.prudent {
            let prudent = PrudentRanking::compute(digraph, &settings, self.config.ranking.prudent_cut_ceiling, &ctx)?;
            let diagnostics = prudent.all_diagnostics();
            (prudent.ranking, prudent.cut_level, diagnostics)
        } else {
            let ranking = RankingByChoosing::compute(digraph, &settings, &ctx)?;
            let diagnostics = ranking.diagnostics.clone();
            (ranking, None, diagnostics)
        };

        let report = ranking_report(RankingReportInput {
            tableau: tableau.name(),
            strategy: strategy.label(),
            source: digraph,
            order: &ranking.fused_order,
            correlation: ranking.correlation,
            cut_level,
            diagnostics,
        });
        info!(
            classes = report.classes.len(),
            correlation = %report.correlation.correlation,
            degraded = report.is_degraded(),
            "ranking report ready"
        );
        Ok(report)
    }

    /// Rating report of `tableau` against its learned quantile profiles.
    pub fn rate(&self, tableau: &PerformanceTableau) -> Result<AnalysisReport, OutrankingError> {
        let ctx = self.context();
        let strategy = self.config.strategy();
        let rating = RatingBySorting::compute(tableau, &strategy, &self.config.sorting_settings(), &ctx)?;
        let report = rating_report(tableau.name(), strategy.label(), &rating);
        info!(
            categories = rating.settings.categories,
            classes = report.classes.len(),
            correlation = %report.correlation.correlation,
            "rating report ready"
        );
        Ok(report)
    }

    fn context(&self) -> ComputeContext {
        let ctx = self.config.compute_context();
        match &self.cancellation {
            Some(token) => ctx.with_cancellation(token.clone()),
            None => ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonReportExporter;
    use crate::domain::foundation::{ActionId, CriterionId, ErrorCode};
    use crate::domain::performance::{Action, Criterion};
    use crate::ports::{ReportKind, StoreError};
    use rust_decimal_macros::dec;

    /// Serves one in-memory tableau whatever the path.
    struct FixedTableau(PerformanceTableau);

    impl TableauStore for FixedTableau {
        fn load(&self, _path: &Path) -> Result<PerformanceTableau, StoreError> {
            Ok(self.0.clone())
        }

        fn save(&self, _tableau: &PerformanceTableau, _path: &Path) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn chain() -> PerformanceTableau {
        let mut builder = PerformanceTableau::builder()
            .name("chain")
            .criterion(Criterion::new(CriterionId::new("g").unwrap()));
        for (id, value) in [("a", dec!(90)), ("b", dec!(50)), ("c", dec!(10))] {
            builder = builder
                .action(Action::new(ActionId::new(id).unwrap()))
                .evaluation("g", id, value);
        }
        builder.build().unwrap()
    }

    fn pipeline() -> AnalysisPipeline {
        AnalysisPipeline::new(
            Arc::new(FixedTableau(chain())),
            Arc::new(JsonReportExporter::default()),
            AnalysisConfig::default(),
        )
    }

    #[test]
    fn ranks_a_dominance_chain() {
        let report = pipeline().analyze(Path::new("chain.txt"), AnalysisMode::Rank).unwrap();
        assert_eq!(report.kind, ReportKind::Ranking);
        let members: Vec<&str> = report.classes.iter().map(|c| c.members[0].as_str()).collect();
        assert_eq!(members, vec!["a", "b", "c"]);
        assert_eq!(report.correlation.correlation, dec!(1));
        assert_eq!(report.cut_level, None);
    }

    #[test]
    fn rates_into_categories() {
        let report = pipeline().analyze(Path::new("chain.txt"), AnalysisMode::Rate).unwrap();
        assert_eq!(report.kind, ReportKind::Rating);
        assert!(report.classes.iter().all(|c| c.categories.is_some()));
        assert_eq!(report.classes[0].members[0].as_str(), "a");
    }

    #[test]
    fn run_renders_json() {
        let command = AnalysisCommand {
            tableau_path: PathBuf::from("chain.txt"),
            mode: AnalysisMode::Rank,
        };
        let rendered = pipeline().run(&command).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["kind"], "ranking");
        assert_eq!(value["tableau"], "chain");
    }

    #[test]
    fn cancellation_aborts_the_run() {
        let token = CancellationToken::new();
        token.cancel();
        let result = pipeline()
            .with_cancellation(token)
            .analyze(Path::new("chain.txt"), AnalysisMode::Rank);
        assert_eq!(result.unwrap_err().code(), ErrorCode::Cancelled);
    }

    #[test]
    fn modes_parse() {
        assert_eq!("rate".parse::<AnalysisMode>().unwrap(), AnalysisMode::Rate);
        assert!("sort".parse::<AnalysisMode>().is_err());
    }
}
