use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use bipolar_outranking::adapters::{JsonReportExporter, TextTableauStore};
use bipolar_outranking::application::{AnalysisCommand, AnalysisMode, AnalysisPipeline};
use bipolar_outranking::config::{AnalysisConfig, LoggingConfig};

/// Exit status of unusable configuration.
const CONFIG_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "bipolar-outranking", version, about = "Rank or rate a performance tableau")]
struct Cli {
    /// Performance tableau in the line-oriented text format
    tableau: PathBuf,
    /// `rank` or `rate`
    #[arg(default_value = "rank")]
    mode: AnalysisMode,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AnalysisConfig::load().map_err(|e| e.to_string()).and_then(|config| {
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("configuration error: {}", message);
            return ExitCode::from(CONFIG_EXIT);
        }
    };
    init_tracing(&config.logging);

    let pipeline = AnalysisPipeline::new(
        Arc::new(TextTableauStore::new()),
        Arc::new(JsonReportExporter::default()),
        config,
    );
    let command = AnalysisCommand {
        tableau_path: cli.tableau,
        mode: cli.mode,
    };
    match pipeline.run(&command) {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = %e.code(), error = %e, "analysis failed");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
