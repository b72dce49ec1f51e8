#![forbid(unsafe_code)]

//! # sagres
//!
//! Peer-relative fundamental stock screener.
//!
//! sagres is an umbrella crate that re-exports the sagres sub-crates for
//! convenience. It classifies publicly traded equities as entry candidates,
//! exit candidates, or neither, by comparing each instrument's fundamental
//! ratios against outlier-robust statistics of its (market cap tier,
//! industry) peer group.
//!
//! ## Pipeline
//!
//! 1. **Ingest** a cleaned snapshot into a
//!    [`FundamentalsTable`](model::FundamentalsTable)
//! 2. **Group** records and compute IQR-trimmed peer statistics with
//!    [`GroupStatistics`](stats::GroupStatistics)
//! 3. **Merge** the statistics back onto each record with
//!    [`merge`](stats::merge)
//! 4. **Scan** the merged table with the
//!    [`EntryScanner`](scan::EntryScanner), the
//!    [`ExitScanner`](scan::ExitScanner), or a plain
//!    [`snapshot`](scan::snapshot) selection
//!
//! Each stage consumes an immutable input and returns a new table; the
//! entry and exit scans are independent consumers of the same merged data.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sagres::model::Metric;
//! use sagres::scan::EntryScanner;
//! use sagres::stats::{GroupStatistics, merge};
//!
//! # fn main() -> sagres::Result<()> {
//! let table = sagres::ingest::load_snapshot("snapshot.csv".as_ref())
//!     .map_err(|e| sagres::ScreenError::Other(e.to_string()))?;
//! let stats = GroupStatistics::default().compute(&table, &Metric::ALL)?;
//! let merged = merge(&table, &stats)?;
//! let candidates = EntryScanner::default().scan(&merged)?;
//! # let _ = candidates;
//! # Ok(())
//! # }
//! ```

/// Version information for the sagres crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Data model, schema contract, and robust statistics primitives.
pub mod model {
    pub use sagres_core::*;
}

/// Peer-group statistics and stat merging.
pub mod stats {
    pub use sagres_stats::*;
}

/// Entry scan, exit scan, and ad-hoc snapshot selection.
pub mod scan {
    pub use sagres_scan::*;
}

/// Snapshot CSV and position-statement ingestion.
pub mod ingest {
    pub use sagres_ingest::*;
}

// Re-export the core types at the top level for convenience.
pub use sagres_core::{
    FundamentalsTable, MarketCapTier, Metric, RawRecord, Result, ScreenError, Symbol,
};
pub use sagres_scan::{EntryScanner, ExitReport, ExitScanner};
pub use sagres_stats::{GroupStatistics, GroupStats, MergedTable};
