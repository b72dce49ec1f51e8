//! CLI configuration loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use sagres_scan::{EntryConfig, ExitConfig};
use sagres_stats::GroupStatsConfig;

/// Screener configuration, JSON-loadable. Every section falls back to its
/// default when absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ScreenerConfig {
    /// Peer-group statistics settings.
    pub(crate) group: GroupStatsConfig,
    /// Entry scan thresholds.
    pub(crate) entry: EntryConfig,
    /// Exit scan thresholds.
    pub(crate) exit: ExitConfig,
}

/// Loads configuration from a JSON file, or defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<ScreenerConfig> {
    let Some(path) = path else {
        return Ok(ScreenerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
