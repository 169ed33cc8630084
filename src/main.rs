use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use isa_census::report::{self, RunReport};
use isa_census::{ExtractConfig, Strategy};

/// Which strategies to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Tree,
    Streaming,
    Both,
}

impl StrategyArg {
    /// Strategies in run order; the tree runs first when both are requested
    fn strategies(self) -> &'static [Strategy] {
        match self {
            StrategyArg::Tree => &[Strategy::Tree],
            StrategyArg::Streaming => &[Strategy::Streaming],
            StrategyArg::Both => &[Strategy::Tree, Strategy::Streaming],
        }
    }
}

/// Find the term with the most is_a parents in each GO ontology.
#[derive(Parser)]
#[command(name = "isa-census", version)]
struct Cli {
    /// OBO-XML file to read
    file: PathBuf,

    #[arg(long, default_value = "both", value_enum)]
    strategy: StrategyArg,

    /// Bytes per read for the streaming strategy
    #[arg(long, default_value_t = isa_census::reader::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Element delimiting one term
    #[arg(long, default_value = "term")]
    record_tag: String,

    /// Element counted as a parent relation
    #[arg(long, default_value = "is_a")]
    marker_tag: String,
}

impl Cli {
    fn config(&self) -> ExtractConfig {
        ExtractConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_record_tag(self.record_tag.clone())
            .with_marker_tag(self.marker_tag.clone())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("isa_census=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();

    // Every run completes before anything is printed
    let runs = cli
        .strategy
        .strategies()
        .iter()
        .map(|&strategy| {
            report::run_timed(strategy, &cli.file, &config)
                .with_context(|| format!("{} run over {}", strategy.label(), cli.file.display()))
        })
        .collect::<anyhow::Result<Vec<RunReport>>>()?;

    if !report::tables_agree(&runs) {
        warn!("strategies disagree; the tree skips terms missing a name, id or namespace");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for run in &runs {
        report::write_results(&mut out, &run.title(), &run.extraction.table)?;
    }
    report::write_comparison(&mut out, &runs)?;
    out.flush()?;
    Ok(())
}
