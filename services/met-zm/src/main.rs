//! Zonal means of meteorological data.
//!
//! Reads a control file and a list of meteorological snapshot files and
//! writes the zonal-mean cross-section as a text table.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use climatology::ClimatologyDataset;
use met_data::AutoReader;
use zonal_mean::{ControlFile, ZonalMeanConfig, ZonalMeanEngine};

#[derive(Parser, Debug)]
#[command(name = "met-zm")]
#[command(about = "Calculate zonal means of meteorological data")]
struct Args {
    /// Control file, or "-" for defaults
    control: PathBuf,

    /// Output table
    output: PathBuf,

    /// Meteorological snapshot files, processed in order
    #[arg(required = true, num_args = 1..)]
    met_files: Vec<PathBuf>,

    /// Override a control parameter (NAME=VALUE), may be repeated
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;
    run(&args)
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| anyhow!(e))
}

fn run(args: &Args) -> Result<()> {
    info!(
        control = %args.control.display(),
        files = args.met_files.len(),
        "Starting zonal-mean calculation"
    );

    let config = load_config(args)?;

    let climatology =
        ClimatologyDataset::load(&config.climatology).context("Failed to load climatology")?;

    let mut engine = ZonalMeanEngine::new(&config, &climatology);
    engine
        .process_files(&AutoReader, &args.met_files)
        .context("Failed to aggregate meteorological data")?;

    let result = engine
        .finish()
        .context("None of the meteorological files could be read")?;

    result
        .write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        levels = result.grid.nz(),
        lats = result.grid.ny(),
        samples = result.accumulators.total_samples(),
        "Wrote zonal means"
    );
    Ok(())
}

fn load_config(args: &Args) -> Result<ZonalMeanConfig> {
    let mut control = ControlFile::load(&args.control)
        .with_context(|| format!("Failed to read control file {}", args.control.display()))?;

    for assignment in &args.overrides {
        control
            .apply_override(assignment)
            .with_context(|| format!("Invalid --set {}", assignment))?;
    }

    ZonalMeanConfig::from_control(&control).context("Invalid configuration")
}
