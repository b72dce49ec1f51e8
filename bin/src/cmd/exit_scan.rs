//! Exit-scan command implementation.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use sagres_ingest::{latest_position_file, load_held_symbols};
use sagres_scan::ExitScanner;

use crate::config::ScreenerConfig;
use crate::{data, output};

/// Runs the exit scan for the currently held positions, writing a
/// timestamped out-of-scanner symbol list and exit signal table.
pub(crate) fn run(
    data_dir: &Path,
    positions: Option<&Path>,
    positions_dir: &Path,
    output_dir: &Path,
    config: &ScreenerConfig,
) -> Result<()> {
    let statement = match positions {
        Some(path) => path.to_path_buf(),
        None => latest_position_file(positions_dir)?,
    };
    let held = load_held_symbols(&statement)?;
    println!("{} held positions from {}", held.len(), statement.display());

    let merged = data::load_merged_universe(data_dir, config.group)?;
    let report = ExitScanner::new(config.exit).scan(&merged, &held)?;

    if !report.out_of_scanner.is_empty() {
        println!(
            "{} position(s) out of scanner: {}",
            report.out_of_scanner.len(),
            report.out_of_scanner.join(", ")
        );
    }

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    output::write_symbols(
        &report.out_of_scanner,
        &output_dir
            .join("Unscannable")
            .join(format!("{timestamp}_OutOfScanner.csv")),
    )?;
    output::write_dataframe(
        &report.signals,
        &output_dir
            .join("Scannable")
            .join(format!("{timestamp}_ExitSignals.csv")),
    )?;
    println!("File processing completed");
    Ok(())
}
