//! Data loading utilities for the Sagres CLI.

use std::path::Path;

use anyhow::{Result, bail};
use log::info;

use sagres_core::Metric;
use sagres_ingest::{load_snapshot, snapshot_files};
use sagres_stats::{GroupStatistics, GroupStatsConfig, MergedTable, merge};

/// Cleans every snapshot file under `data_dir`, computes each file's peer
/// statistics, merges them on, and stacks the results into one table.
///
/// Statistics are always per file: each snapshot is its own market cross
/// section, and mixing dates would blur the peer baselines.
pub(crate) fn load_merged_universe(
    data_dir: &Path,
    config: GroupStatsConfig,
) -> Result<MergedTable> {
    let files = snapshot_files(data_dir)?;
    if files.is_empty() {
        bail!("no snapshot files found in {}", data_dir.display());
    }

    let computer = GroupStatistics::new(config);
    let mut tables = Vec::with_capacity(files.len());
    for file in &files {
        let table = load_snapshot(file)?;
        let stats = computer.compute(&table, &Metric::ALL)?;
        info!(
            "{}: {} records across {} peer groups",
            file.display(),
            table.len(),
            stats.len()
        );
        tables.push(merge(&table, &stats)?);
    }
    Ok(MergedTable::concat(tables)?)
}
