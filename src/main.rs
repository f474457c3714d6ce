//! CLI entry point for the interactive bikeshare explorer.

use anyhow::{Result, anyhow};
use bikeshare_explorer::{
    Console, DataSources, DatasetLoader, FilterSelector, RawDataPager, RunReport,
    StatisticsEngine, StdConsole,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Interactive exploration of US bikeshare trip records",
    long_about = "Explore bikeshare trip records for Chicago, New York City and\n\
                  Washington. The tool asks which city to analyse, lets you narrow\n\
                  the data to a month and/or weekday, prints travel-time, station,\n\
                  duration and user statistics, and can page through the raw rows.\n\n\
                  EXAMPLES:\n  \
                  # Analyse the CSVs in ./data\n  \
                  bikeshare-explorer\n\n  \
                  # Point at another dataset directory and save a JSON report\n  \
                  bikeshare-explorer --data-dir /srv/bikeshare --emit-report"
)]
struct Args {
    /// Directory containing the regional CSV files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Output directory for JSON reports
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Write a JSON report of each analysis run
    ///
    /// The report is saved as <region>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    let sources = DataSources::from_dir(&args.data_dir);
    if sources.is_empty() {
        return Err(anyhow!(
            "No datasets configured under {}",
            args.data_dir.display()
        ));
    }
    info!(data_dir = %args.data_dir.display(), "datasets configured");

    let mut console = StdConsole;
    loop {
        console.write_line("Hello! Let's explore some US bikeshare data!");

        let request = FilterSelector::new(&sources).select(&mut console)?;
        let df = DatasetLoader::new(&sources).load(&request)?;

        let bundle = StatisticsEngine::run(&mut console, &df)?;
        if args.emit_report {
            let report = RunReport::new(&request, df.height(), bundle);
            let path = report.write_to(&args.output)?;
            console.write_line(&format!("Report written to {}", path.display()));
        }

        RawDataPager::run(&mut console, &df)?;

        console.write_line("\nWould you like to restart? Enter yes or no.");
        let answer = console.read_line()?;
        if !answer.trim().eq_ignore_ascii_case("yes") {
            break;
        }
    }

    Ok(())
}
