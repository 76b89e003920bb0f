//! rowdiff - Column-wise set difference for tabular data

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rowdiff::config::{Config, OutputFormat};
use rowdiff::diff::DiffEngine;
use rowdiff::output::render_to_stdout;
use rowdiff::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    fn enabled(self) -> bool {
        match self {
            ColorWhen::Auto => std::io::stdout().is_terminal(),
            ColorWhen::Always => true,
            ColorWhen::Never => false,
        }
    }
}

/// Report the values each column has in only one of two tabular files
#[derive(Parser, Debug)]
#[command(name = "rowdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First file to compare
    old_file: PathBuf,

    /// Second file to compare
    new_file: PathBuf,

    /// A column to find the difference of; "a,b" compares a composite column
    #[arg(short = 'c', long = "col", value_name = "COL")]
    cols: Vec<String>,

    /// A column to ignore when doing a diff
    #[arg(short, long, value_name = "COL")]
    ignore: Vec<String>,

    /// Compare all columns of the first row, in addition to any given with --col
    #[arg(short, long)]
    all: bool,

    /// A column to group diff values by
    #[arg(short, long, value_name = "COL")]
    group_by: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// When to color terminal output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorWhen,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(cli) {
        Ok(has_changes) => {
            if has_changes {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut config = Config::new(cli.old_file, cli.new_file)
        .with_columns(cli.cols)
        .with_ignore_columns(cli.ignore)
        .with_all_columns(cli.all)
        .with_output_format(cli.format.into())
        .with_color(cli.color.enabled());
    if let Some(group_by) = cli.group_by {
        config = config.with_group_by(group_by);
    }

    // Parse files
    let factory = ParserFactory::new();

    let old = factory
        .parse(&config.old_file)
        .with_context(|| format!("Failed to parse old file: {}", config.old_file.display()))?;

    let new = factory
        .parse(&config.new_file)
        .with_context(|| format!("Failed to parse new file: {}", config.new_file.display()))?;

    if old.is_empty() && new.is_empty() {
        println!("Both sets are empty");
        return Ok(false);
    }

    let engine = DiffEngine::from_config(&config, &old, &new).context("Invalid column selection")?;
    if engine.columns().is_empty() {
        log::warn!("no columns selected; use --col or --all");
    }

    let diff = engine.diff(&old, &new);

    render_to_stdout(
        &diff,
        &config.old_file,
        &config.new_file,
        config.output_format,
        config.color,
    )?;

    Ok(diff.has_changes())
}
