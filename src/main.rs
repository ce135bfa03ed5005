// Command-line entry point for livetrace.

use clap::Parser;
use livetrace::application::ReportUsecase;
use livetrace::domain::report::OutputFormat;
use livetrace::domain::source::SourceInput;
use livetrace::infrastructure::config::{CliOverrides, FileConfig, Settings};
use livetrace::infrastructure::logging::init_logging;
use livetrace::infrastructure::{PythonLocator, SpaceTracer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Trace a Python snippet with space_tracer", long_about = None)]
struct Cli {
    /// Python interpreter to run the tracer with
    #[arg(long)]
    python: Option<PathBuf>,

    /// Trace this file instead of the built-in sample
    #[arg(long)]
    file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Tracer module providing `main.TraceRunner`
    #[arg(long)]
    module: Option<String>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown format `{}` (expected text or json)", s))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(
        CliOverrides {
            python: cli.python,
            module: cli.module,
            format: cli.format,
            file: cli.file,
        },
        file_config,
    )?;

    let python = PythonLocator::from_process_env().resolve(settings.python.as_deref());
    let tracer = SpaceTracer::with_module(python, settings.module);

    let usecase = ReportUsecase {
        tracer: &tracer,
        format: settings.format,
    };

    // Tracing failures are printed, not propagated: exit status stays 0.
    let mut stdout = std::io::stdout().lock();
    let outcome = usecase.run_input_to(&SourceInput::from_file(settings.file), &mut stdout)?;
    tracing::debug!(success = outcome.is_report(), "done");

    Ok(())
}
