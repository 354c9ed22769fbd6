//! Propscore: Property Investment Scoring CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use propscore::config::{default_config_json, load_config, CONFIG_FILENAME};
use propscore::reporter::{ConsoleReporter, CsvReporter, JsonReporter};
use propscore::{ComparisonTable, ScoreResult, ScoringEngine, Strategy};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Propscore: rank residential areas by investment quality
#[derive(Parser, Debug)]
#[command(name = "propscore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single area from a JSON file holding one metrics object
    Score {
        /// JSON file with the five metric readings
        file: PathBuf,

        /// Area name used in the report (default: file stem)
        #[arg(long)]
        area: Option<String>,

        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Score and rank several areas from a JSON object of area name -> metrics
    Compare {
        /// JSON file mapping area names to metric objects
        file: PathBuf,

        /// Score areas in parallel
        #[arg(long)]
        parallel: bool,

        /// Also print the full report for the top-ranked area (console output only)
        #[arg(long)]
        detail_top: bool,

        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Create .propscorerc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Weight preset: balanced, conservative, aggressive
        #[arg(long, default_value_t = Strategy::Balanced)]
        strategy: Strategy,

        /// Minimum composite score (e.g. 65)
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[derive(Args, Debug)]
struct CommonOpts {
    /// Output format as JSON
    #[arg(long, short, conflicts_with = "csv")]
    json: bool,

    /// Output format as CSV
    #[arg(long)]
    csv: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Quiet mode (one line per area)
    #[arg(long, short)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output (debug logging)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .propscorerc.json next to the input and in parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Weight preset: balanced, conservative, aggressive (overrides config weights)
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Minimum composite score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,
}

impl CommonOpts {
    fn console(&self) -> ConsoleReporter {
        if self.no_color {
            ConsoleReporter::new().without_colors()
        } else {
            ConsoleReporter::new()
        }
    }

    fn json_reporter(&self) -> JsonReporter {
        if self.pretty {
            JsonReporter::new().pretty()
        } else {
            JsonReporter::new()
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { file, area, opts } => {
            init_logging(&opts);
            run_score(&file, area, &opts)
        }
        Commands::Compare {
            file,
            parallel,
            detail_top,
            opts,
        } => {
            init_logging(&opts);
            run_compare(&file, parallel, detail_top, &opts)
        }
        Commands::Init {
            dir,
            strategy,
            threshold,
        } => run_init(dir.as_deref(), strategy, threshold),
    }
}

/// Logs go to stderr; RUST_LOG wins over the flag-derived default
fn init_logging(opts: &CommonOpts) {
    if opts.no_color {
        colored::control::set_override(false);
    }
    let default_level = if opts.verbose {
        "debug"
    } else if opts.quiet {
        "error"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!opts.no_color)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Load config next to the input file and build the engine (CLI flags override config file)
fn build_engine(file: &Path, opts: &CommonOpts) -> Result<(ScoringEngine, Option<f64>)> {
    let work_dir = work_dir_for(file);
    let config = load_config(&work_dir, opts.config.as_deref())?
        .merge_with_cli(opts.threshold, opts.strategy);
    let engine = config.build_engine()?;
    Ok((engine, config.threshold))
}

fn read_json(file: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", file.display()))
}

fn run_score(file: &Path, area: Option<String>, opts: &CommonOpts) -> Result<ExitCode> {
    let (engine, threshold) = build_engine(file, opts)?;
    let readings = read_json(file)?;
    let area = area.unwrap_or_else(|| area_name_from(file));

    let result = engine.calculate_composite_score(&area, &readings)?;

    if opts.json {
        println!("{}", opts.json_reporter().report(&result));
    } else if opts.csv {
        print!("{}", CsvReporter::new().report(&result));
    } else if opts.quiet {
        println!("{}", opts.console().render_quiet(&result));
    } else {
        print!("{}", opts.console().render(&result));
    }

    if let Some(threshold) = threshold {
        if result.composite_score < threshold {
            if !opts.quiet && !opts.json {
                eprintln!(
                    "\n{}: Score {:.1} is below threshold {}",
                    "Failed".red().bold(),
                    result.composite_score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_compare(
    file: &Path,
    parallel: bool,
    detail_top: bool,
    opts: &CommonOpts,
) -> Result<ExitCode> {
    let (engine, threshold) = build_engine(file, opts)?;
    let areas: BTreeMap<String, Value> = serde_json::from_value(read_json(file)?)
        .with_context(|| {
            format!(
                "{} must hold an object mapping area names to metric objects",
                file.display()
            )
        })?;

    if areas.is_empty() {
        eprintln!("{}: No areas found in {}", "Warning".yellow(), file.display());
        return Ok(ExitCode::from(2));
    }

    let table = if parallel {
        engine.compare_areas_parallel(&areas)
    } else {
        engine.compare_areas(&areas)
    };

    if opts.json {
        println!("{}", opts.json_reporter().report_comparison(&table));
    } else if opts.csv {
        print!("{}", CsvReporter::new().report_comparison(&table));
    } else if opts.quiet {
        let console = opts.console();
        for result in &table.results {
            println!("{}", console.render_quiet(result));
        }
        for failure in &table.failures {
            eprintln!(
                "{}: {}: {}",
                "Warning".yellow(),
                failure.area_name,
                failure.error
            );
        }
    } else {
        let console = opts.console();
        print!("{}", console.render_comparison(&table));
        if let Some(top) = table.top().filter(|_| detail_top) {
            println!();
            print!("{}", console.render(top));
        }
    }

    let below = threshold
        .map(|t| below_threshold(&table, t))
        .unwrap_or_default();
    if let Some(threshold) = threshold {
        if !below.is_empty() && !opts.quiet && !opts.json {
            let names: Vec<&str> = below.iter().map(|r| r.area_name.as_str()).collect();
            eprintln!(
                "\n{}: {} area(s) below threshold {}: {}",
                "Failed".red().bold(),
                names.len(),
                threshold,
                names.join(", ")
            );
        }
    }

    if table.is_complete() && below.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn run_init(dir: Option<&Path>, strategy: Strategy, threshold: Option<f64>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let json = default_config_json(strategy, threshold)?;
    std::fs::write(&config_path, format!("{json}\n"))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with strategy={}{}",
        "Done".green().bold(),
        config_path.display(),
        strategy,
        threshold
            .map(|t| format!(", threshold={t}"))
            .unwrap_or_default()
    );
    Ok(ExitCode::SUCCESS)
}

/// Directory used as the start of the config search for an input file
fn work_dir_for(file: &Path) -> PathBuf {
    let dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

fn area_name_from(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "area".to_string())
}

fn below_threshold(table: &ComparisonTable, threshold: f64) -> Vec<&ScoreResult> {
    table
        .results
        .iter()
        .filter(|r| r.composite_score < threshold)
        .collect()
}
