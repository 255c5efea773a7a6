//! Quality report CLI
//!
//! Reads page text extracted by an external loader (PDF, DOCX or plain
//! text), runs the rule-based quality engine over it and prints the report
//! as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quality_engine::{EngineConfig, Language, QualityEngine};
use tracing::{debug, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod input;

/// Command-line arguments for the quality report
#[derive(Parser, Debug)]
#[command(name = "quality-cli")]
#[command(about = "Rule-based document quality report")]
struct Args {
    /// JSON page dump: `{"file_name": .., "pages": [..]}` or a bare page array
    input: PathBuf,

    /// Report language (ko or en)
    #[arg(short, long, default_value = "ko")]
    language: Language,

    /// File name recorded in the report
    #[arg(long)]
    file_name: Option<String>,

    /// Engine configuration (JSON, partial values keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_json_str(&raw)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let engine = QualityEngine::new(load_config(args.config.as_ref())?)?;
    debug!(config = ?engine.config(), "engine configured");

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let document = input::parse_document(&raw, &args.input, args.file_name.as_deref())?;
    info!(
        "Analyzing {} ({} pages, language {})",
        document.file_name,
        document.pages.len(),
        args.language.code()
    );

    let report = engine
        .analyze(&document, args.language)
        .with_context(|| format!("failed to analyze {}", args.input.display()))?;

    let json = if args.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{}", json);

    Ok(())
}
