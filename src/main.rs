use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use shapeclass::{ClassifierConfig, Grid, ShapeClassification, ShapeError, build_standard_pipeline};

#[derive(Parser)]
#[command(name = "shapeclass")]
#[command(about = "Classify a 15x15 binary grid as a circle, a square or an unknown shape")]
#[command(version)]
struct Cli {
    /// Path to the grid text file
    #[arg(value_name = "GRID")]
    grid_path: PathBuf,

    /// Print intermediate matrices and enable info logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding classifier parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save per-step debug images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprint!("{}", ShapeError::Usage(e.render().to_string()));
            return ExitCode::from(1);
        }
        Err(e) => e.exit(),
    };

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ClassifierConfig::from_json_file(path)?,
        None => ClassifierConfig::default(),
    };

    if args.verbose {
        println!("Loading grid: {:?}", args.grid_path);
    }
    let grid = Grid::load(&args.grid_path, &config)?;

    let mut pipeline = build_standard_pipeline(config, args.verbose && !args.json);
    if let Some(debug_dir) = &args.debug_out {
        pipeline = pipeline.with_debug(debug_dir.clone())?;
    }

    let report = pipeline.classify(grid)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Found biggest bounding box: {}", report.bounding_box);
    for penalty in &report.penalties {
        println!("{}", penalty);
    }
    if let ShapeClassification::Unknown { reason, .. } = &report.result {
        println!("Reason: {}", reason);
    }
    println!("{}", report.result);

    Ok(())
}
