use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use pkg_insight_analyzer::{AnalyzeError, analyze_auto, analyze_output, classify, metrics};
use pkg_insight_core::{CommandKind, Severity, filter_issues};

mod output;

use output::{OutputFormat, format_analysis};

/// CLI-side command kind with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliCommandKind {
    DumpPackage,
    ShowDependencies,
    Resolve,
    Describe,
    Update,
}

impl From<CliCommandKind> for CommandKind {
    fn from(kind: CliCommandKind) -> Self {
        match kind {
            CliCommandKind::DumpPackage => Self::DumpPackage,
            CliCommandKind::ShowDependencies => Self::ShowDependencies,
            CliCommandKind::Resolve => Self::Resolve,
            CliCommandKind::Describe => Self::Describe,
            CliCommandKind::Update => Self::Update,
        }
    }
}

/// CLI-side minimum severity with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl From<CliSeverity> for Severity {
    fn from(severity: CliSeverity) -> Self {
        match severity {
            CliSeverity::Info => Self::Info,
            CliSeverity::Warning => Self::Warning,
            CliSeverity::Error => Self::Error,
            CliSeverity::Critical => Self::Critical,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pkg-insight")]
#[command(about = "Structured diagnostics from package-manager output")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze package-manager output from stdin or a file.
    Analyze(AnalyzeArgs),
    /// Print the detected command kind without analyzing.
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Read input from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Treat the input as this command's output instead of classifying.
    #[arg(long)]
    kind: Option<CliCommandKind>,
    /// Restrict manifest analysis to a single target.
    #[arg(long)]
    target: Option<String>,
    /// Output format (default: full).
    #[arg(long, default_value = "full")]
    format: OutputFormat,
    /// Drop issues below this severity.
    #[arg(long)]
    min_severity: Option<CliSeverity>,
    /// Echo the raw input in the result.
    #[arg(long)]
    include_raw: bool,
    /// Skip the metrics block.
    #[arg(long)]
    no_metrics: bool,
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    /// Read input from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Classify(args) => run_classify(args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<i32, String> {
    let input = read_input(args.input.as_deref()).map_err(|err| err.to_string())?;

    let started = Instant::now();
    let mut analysis = match args.kind {
        Some(kind) => analyze_output(kind.into(), &input, args.target.as_deref()),
        None => analyze_auto(&input, args.target.as_deref()),
    };
    let parse_duration = started.elapsed();

    // The only two mutations after construction: metrics and filtering.
    if !args.no_metrics {
        analysis.metrics = Some(metrics::build_metrics(&analysis, parse_duration));
    }
    if let Some(minimum) = args.min_severity {
        analysis.issues = filter_issues(analysis.issues, minimum.into());
    }
    if args.include_raw {
        analysis.raw_input = Some(input);
    }

    let rendered = format_analysis(&analysis, args.format)?;
    println!("{rendered}");

    Ok(if analysis.success { 0 } else { 1 })
}

fn run_classify(args: ClassifyArgs) -> Result<i32, String> {
    let input = read_input(args.input.as_deref()).map_err(|err| err.to_string())?;
    println!("{}", classify::classify_output(&input));
    Ok(0)
}

/// Reads the input file, or stdin when no file was given.
///
/// Input bytes that are not valid UTF-8 are the one hard failure that
/// aborts before any parser runs.
fn read_input(path: Option<&std::path::Path>) -> Result<String, AnalyzeError> {
    let bytes = match path {
        Some(path) => fs::read(path)?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };
    Ok(String::from_utf8(bytes)?)
}
