//! TaskTagger - Smart Task Summarizer + Tagger
//!
//! Command-line front end: gathers tasks, classifies them, prints the
//! results and optionally exports them.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tasktagger::config::{config_path, Config};
use tasktagger::export::{ExportFormat, PriorityBand};
use tasktagger::samples::sample_tasks;
use tasktagger::{ClassificationRecord, Outcome, TaskProcessor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tasks to classify (defaults to the built-in samples)
    tasks: Vec<String>,

    /// Read tasks from a file, one per line
    #[arg(short, long, conflicts_with = "tasks")]
    file: Option<PathBuf>,

    /// Classify the built-in sample tasks
    #[arg(long, conflicts_with_all = ["tasks", "file"])]
    sample: bool,

    /// Skip the remote model even if an API key is configured
    #[arg(long)]
    offline: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Export the results
    #[arg(short, long, value_enum)]
    export: Option<ExportArg>,

    /// Export file or directory (defaults to the current directory)
    #[arg(short, long, requires = "export")]
    output: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the config file with every setting filled in, then exit
    #[arg(long)]
    init_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportArg {
    Csv,
    Spreadsheet,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Spreadsheet => ExportFormat::Spreadsheet,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🎯 TaskTagger v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.init_config {
        return init_config(args.config.as_deref());
    }

    let tasks = collect_tasks(&args)?;

    let config = if args.offline {
        config.without_credential()
    } else {
        config
    };
    if config.credential().is_none() && !args.offline {
        warn!("OPENAI_API_KEY not set, tasks will be classified by keyword rules");
    }

    let processor = TaskProcessor::from_config(&config)?;
    let outcome = processor.process(&tasks).await?;

    if args.json {
        print_json(&outcome)?;
    } else {
        print_table(&outcome);
    }

    if let Some(format) = args.export {
        let format = ExportFormat::from(format);
        let target = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
        let now = chrono::Local::now().naive_local();
        let path = format.write_to(&target, outcome.records(), &now)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let written = match path {
        Some(path) => {
            Config::read_file(path)?.save_to(path)?;
            path.to_path_buf()
        }
        None => {
            let path = config_path();
            Config::read_file(&path)?.save()?;
            path
        }
    };
    eprintln!("Config written to {}", written.display());
    Ok(())
}

fn collect_tasks(args: &Args) -> Result<Vec<String>> {
    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tasks from {}", path.display()))?;
        return Ok(content.lines().map(str::to_string).collect());
    }
    if args.sample || args.tasks.is_empty() {
        info!("💡 No tasks supplied, using sample tasks");
        return Ok(sample_tasks());
    }
    Ok(args.tasks.clone())
}

fn print_json(outcome: &Outcome) -> Result<()> {
    let body = serde_json::json!({
        "success": true,
        "source": outcome.source(),
        "processed_tasks": outcome.records(),
        "total_tasks": outcome.records().len(),
        "processed_at": chrono::Local::now().to_rfc3339(),
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn print_table(outcome: &Outcome) {
    let source = match outcome {
        Outcome::Remote(_) => "AI",
        Outcome::Fallback(_) => "keyword rules",
    };
    println!("Processed {} task(s) via {}\n", outcome.records().len(), source);
    for (idx, record) in outcome.records().iter().enumerate() {
        print_record(idx + 1, record);
    }
}

fn print_record(number: usize, record: &ClassificationRecord) {
    let band = PriorityBand::for_priority(record.priority);
    println!("{number}. {}", record.summary);
    println!("   Tags:     {}", record.tags_text());
    println!("   Priority: {} ({})", record.priority, band.label);
    println!("   Original: {}\n", record.original);
}
