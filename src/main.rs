use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::debug;

use license_header::report::output;
use license_header::{ComplianceReporter, LicenseConfig, Mode, ScanOptions};

#[derive(Parser, Debug)]
#[command(name = "license-header", version, about = "Check and insert license headers in a source tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report files without a conforming license header
    Check(RunArgs),
    /// Insert the license header into files that lack it
    Fix(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, default_value = ".", help = "Root directory of the source tree")]
    root: PathBuf,
    #[arg(short, long, help = "Report every visited file")]
    verbose: bool,
    #[arg(long, help = "TOML configuration file (defaults to <root>/.license-header.toml)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, help = "Number of threads used to evaluate files")]
    threads: Option<usize>,
    #[arg(long, default_value_t = false, help = "Disable the progress bar")]
    no_progress: bool,
    #[arg(help = "Only check these files, relative to the root")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let (mode, args) = match cli.command {
        Commands::Check(args) => (Mode::Check, args),
        Commands::Fix(args) => (Mode::Fix, args),
    };

    match run(mode, args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(mode: Mode, args: RunArgs) -> Result<u8> {
    let config = match &args.config {
        Some(path) => LicenseConfig::load(path)?,
        None => LicenseConfig::discover(&args.root)?,
    };
    debug!("Configuration: {:?}", config);

    let options = ScanOptions {
        mode,
        parallel_threads: args.threads.filter(|&n| n > 0),
        show_progress: !args.no_progress && !args.json,
    };

    let mut reporter = ComplianceReporter::new(&config, options);
    let report = if args.files.is_empty() {
        reporter.run(&args.root)?
    } else {
        reporter.run_paths(&args.root, &args.files)?
    };

    output::print_report(&report, args.verbose, args.json)?;
    Ok(report.exit_code())
}
