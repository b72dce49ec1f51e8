//! Screen command implementation.

use std::path::Path;

use anyhow::Result;

use sagres_core::Metric;
use sagres_ingest::{load_snapshot, snapshot_files};
use sagres_scan::EntryScanner;
use sagres_stats::{GroupStatistics, merge};

use crate::config::ScreenerConfig;
use crate::output;

/// Runs the entry scan over every snapshot file, writing one scored
/// candidate artifact and one peer-means artifact per file.
pub(crate) fn run(
    data_dir: &Path,
    output_dir: &Path,
    means_dir: &Path,
    config: &ScreenerConfig,
) -> Result<()> {
    let files = snapshot_files(data_dir)?;
    println!("{} files found in {}", files.len(), data_dir.display());

    let computer = GroupStatistics::new(config.group);
    let scanner = EntryScanner::new(config.entry);

    for file in &files {
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("snapshot");

        let table = load_snapshot(file)?;
        let stats = computer.compute(&table, &Metric::ALL)?;
        let merged = merge(&table, &stats)?;
        let candidates = scanner.scan(&merged)?;

        output::write_dataframe(&candidates, &output_dir.join(format!("{stem}.csv")))?;
        output::write_dataframe(
            &stats.means_dataframe()?,
            &means_dir.join(format!("{stem}.csv")),
        )?;
        println!("{stem} processed ({} candidates)", candidates.height());
    }
    Ok(())
}
