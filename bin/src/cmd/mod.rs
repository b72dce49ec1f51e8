//! CLI subcommand modules.
//!
//! This module contains the implementations for all sagres CLI subcommands.

pub(crate) mod exit_scan;
pub(crate) mod screen;
pub(crate) mod snapshot;
