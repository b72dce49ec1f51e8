#![forbid(unsafe_code)]

//! Entry and exit scans for the Sagres stock screener.
//!
//! Both scanners consume the same [`MergedTable`](sagres_stats::MergedTable)
//! and are independent of each other:
//!
//! - [`EntryScanner`] keeps records undervalued against their peer group
//!   while clearing absolute quality floors, and attaches z-scores and a
//!   composite score.
//! - [`ExitScanner`] checks held positions for overvaluation and
//!   deterioration signals, surfacing positions that left the screening
//!   universe separately.
//! - [`snapshot`] selects arbitrary symbols out of the merged table with no
//!   criteria at all.

/// The version of the sagres-scan crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod entry;
pub mod exit;
mod predicate;
pub mod snapshot;

#[cfg(test)]
mod testutil;

pub use entry::{EntryConfig, EntryScanner, SCORE};
pub use exit::{BAD_QUALITY, EXIT_METRIC_ORDER, ExitConfig, ExitReport, ExitScanner, OVERVALUATION};
pub use snapshot::snapshot;
