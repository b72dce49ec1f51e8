//! Snapshot command implementation.

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;

use crate::config::ScreenerConfig;
use crate::{data, output};

/// Filters the merged universe down to the selected symbols and writes a
/// timestamped snapshot artifact.
pub(crate) fn run(
    data_dir: &Path,
    symbols: &[String],
    output_dir: &Path,
    config: &ScreenerConfig,
) -> Result<()> {
    let symbols = if symbols.is_empty() {
        collect_symbols()?
    } else {
        symbols.to_vec()
    };
    if symbols.is_empty() {
        bail!("no symbols given");
    }

    let merged = data::load_merged_universe(data_dir, config.group)?;
    let selected = sagres_scan::snapshot(&merged, &symbols)?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    output::write_dataframe(
        &selected,
        &output_dir.join(format!("{timestamp}_snapshot.csv")),
    )?;
    println!("Snapshot created ({} rows)", selected.height());
    Ok(())
}

/// Reads symbols line by line from stdin until an empty line.
fn collect_symbols() -> Result<Vec<String>> {
    println!("Paste stock symbols below and press Enter.");
    println!("When done, press Enter again.");

    let mut symbols = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        symbols.push(trimmed.to_string());
    }
    Ok(symbols)
}
