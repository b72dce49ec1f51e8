//! Sagres CLI binary.
//!
//! Provides the command-line interface for the Sagres stock screener.

mod cmd;
mod config;
mod data;
mod output;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sagres")]
#[command(about = "Peer-relative fundamental stock screener", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file with scan thresholds (defaults apply when
    /// omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan snapshot files for undervalued entry candidates
    Screen {
        /// Directory of downloaded screener snapshot CSV files
        #[arg(short, long, default_value = "Downloaded CSV Files")]
        data_dir: PathBuf,

        /// Directory for scored candidate artifacts
        #[arg(short, long, default_value = "Results")]
        output_dir: PathBuf,

        /// Directory for peer-group means artifacts
        #[arg(short, long, default_value = "Industry Means")]
        means_dir: PathBuf,
    },

    /// Scan held positions for overvaluation and deterioration signals
    ExitScan {
        /// Directory of downloaded screener snapshot CSV files
        #[arg(short, long, default_value = "Downloaded CSV Files")]
        data_dir: PathBuf,

        /// Position statement file (defaults to the newest file in the
        /// positions directory)
        #[arg(short, long)]
        positions: Option<PathBuf>,

        /// Directory of broker position statements
        #[arg(long, default_value = "Position Statement")]
        positions_dir: PathBuf,

        /// Directory for exit signal artifacts
        #[arg(short, long, default_value = "Exit Signals")]
        output_dir: PathBuf,
    },

    /// Snapshot selected symbols against their peer groups
    Snapshot {
        /// Symbols to select; read line by line from stdin when omitted
        symbols: Vec<String>,

        /// Directory of downloaded screener snapshot CSV files
        #[arg(short, long, default_value = "Downloaded CSV Files")]
        data_dir: PathBuf,

        /// Directory for snapshot artifacts
        #[arg(short, long, default_value = "Selected Stock Snapshots")]
        output_dir: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Screen {
            data_dir,
            output_dir,
            means_dir,
        } => cmd::screen::run(&data_dir, &output_dir, &means_dir, &config),
        Commands::ExitScan {
            data_dir,
            positions,
            positions_dir,
            output_dir,
        } => cmd::exit_scan::run(
            &data_dir,
            positions.as_deref(),
            &positions_dir,
            &output_dir,
            &config,
        ),
        Commands::Snapshot {
            symbols,
            data_dir,
            output_dir,
        } => cmd::snapshot::run(&data_dir, &symbols, &output_dir, &config),
    }
}
