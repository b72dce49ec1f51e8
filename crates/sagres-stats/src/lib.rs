#![forbid(unsafe_code)]

//! Peer-group statistics and stat merging for the Sagres stock screener.
//!
//! Two pipeline stages live here:
//!
//! - [`GroupStatistics`] computes IQR-trimmed mean and population standard
//!   deviation per (market cap tier, industry) group for a declared metric
//!   list, producing [`GroupStats`].
//! - [`merge`] left-joins those statistics back onto each instrument
//!   record, producing a [`MergedTable`] that the entry and exit scanners
//!   consume.
//!
//! Both stages take an immutable input table and return a new value; no
//! stage mutates its input.

/// The version of the sagres-stats crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod group;
pub mod merge;

pub use group::{GroupKey, GroupStats, GroupStatsConfig, GroupStatistics};
pub use merge::{MergedTable, merge};
