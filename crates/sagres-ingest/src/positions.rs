//! Broker position-statement parsing.
//!
//! Exit scans need the list of currently held symbols. Brokers export
//! position statements as loosely structured text with several sections;
//! the held positions of interest live in a marked group whose table starts
//! three lines below the marker and runs to the line before the next blank
//! line (the final line of the section is the statement's aggregate row,
//! not a position).

use std::fs;
use std::path::{Path, PathBuf};

use sagres_core::Symbol;

use crate::error::{IngestError, Result};

/// Marker line of the screened positions group.
pub const POSITION_GROUP_MARKER: &str = "Group \"Undervalued\"";

const INSTRUMENT: &str = "Instrument";
const BP_EFFECT: &str = "BP Effect";

/// Loads held symbols from a position-statement file.
///
/// # Errors
///
/// Returns an error on I/O failure or when no marked table is present.
pub fn load_held_symbols(path: &Path) -> Result<Vec<Symbol>> {
    let source = path.display().to_string();
    let text = fs::read_to_string(path)?;
    parse_position_statement(&text, &source)
}

/// Picks the most recently modified file in the positions directory.
///
/// # Errors
///
/// Returns [`IngestError::NoFiles`] when the directory holds no files.
pub fn latest_position_file(dir: &Path) -> Result<PathBuf> {
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(when, _)| modified > *when) {
            newest = Some((modified, path));
        }
    }
    newest
        .map(|(_, path)| path)
        .ok_or_else(|| IngestError::NoFiles(dir.display().to_string()))
}

/// Extracts held symbols from position-statement text.
///
/// Rows without a `BP Effect` value are subtotal or layout rows and are
/// dropped.
///
/// # Errors
///
/// Returns [`IngestError::PositionTableNotFound`] when the marker is absent
/// and [`IngestError::MissingColumn`] when the table lacks an expected
/// column.
pub fn parse_position_statement(text: &str, source: &str) -> Result<Vec<Symbol>> {
    let lines: Vec<&str> = text.lines().collect();
    let marker = lines
        .iter()
        .position(|line| line.contains(POSITION_GROUP_MARKER))
        .ok_or_else(|| IngestError::PositionTableNotFound(source.to_string()))?;

    let start = marker + 3;
    if start >= lines.len() {
        return Err(IngestError::PositionTableNotFound(source.to_string()));
    }
    let end = lines[start + 1..]
        .iter()
        .position(|line| line.trim().is_empty())
        .map_or(lines.len(), |offset| start + offset);
    if end <= start + 1 {
        return Ok(Vec::new());
    }

    let section = lines[start..end].join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(section.as_bytes());
    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| IngestError::MissingColumn {
                file: source.to_string(),
                column: name.to_string(),
            })
    };
    let instrument_idx = column(INSTRUMENT)?;
    let bp_effect_idx = column(BP_EFFECT)?;

    let mut symbols = Vec::new();
    for result in reader.records() {
        let record = result?;
        let bp_effect = record.get(bp_effect_idx).unwrap_or("").trim();
        if bp_effect.is_empty() {
            continue;
        }
        let instrument = record.get(instrument_idx).unwrap_or("").trim();
        if !instrument.is_empty() {
            symbols.push(instrument.to_string());
        }
    }
    Ok(symbols)
}
