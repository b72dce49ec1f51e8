#![forbid(unsafe_code)]

//! Snapshot CSV and position-statement ingestion for the Sagres stock
//! screener.
//!
//! This crate owns the untidy edges of the pipeline: vendor screener
//! exports with boilerplate headers and human-formatted numbers, and broker
//! position statements with a marked table section. Everything it produces
//! is already validated — a [`FundamentalsTable`](sagres_core::FundamentalsTable)
//! or a plain held-symbol list — so the statistics and scan stages never
//! see raw text.

/// The version of the sagres-ingest crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod discover;
pub mod error;
pub mod positions;
pub mod snapshot_csv;

pub use discover::snapshot_files;
pub use error::{IngestError, Result};
pub use positions::{latest_position_file, load_held_symbols, parse_position_statement};
pub use snapshot_csv::{load_snapshot, parse_snapshot};
