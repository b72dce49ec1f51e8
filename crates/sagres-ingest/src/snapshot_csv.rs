//! Screener snapshot CSV cleanup.
//!
//! Vendor exports open with three lines of report boilerplate, use verbose
//! column headers, and format numbers for humans: currency signs, thousands
//! separators, parenthesized negatives, `<empty>` markers, and market caps
//! like `1,234 M`. This module turns one such file into a validated
//! [`FundamentalsTable`].

use std::fs;
use std::path::Path;

use log::info;

use sagres_core::{FundamentalsTable, RawRecord};

use crate::error::{IngestError, Result};

/// Lines of report boilerplate above the header row.
pub const BOILERPLATE_LINES: usize = 3;

const SRC_SYMBOL: &str = "Symbol";
const SRC_COMPANY_NAME: &str = "Company Name";
const SRC_INDUSTRY: &str = "Industry";
const SRC_MARKET_CAP: &str = "Market Cap";
const SRC_LAST: &str = "Last";
const SRC_FREE_CASH_FLOW: &str = "Free Cash Flow Per Share - Current (LTM)";
const SRC_BOOK_VALUE: &str = "Book Value Per Share - Current (LTM)";
const SRC_EPS: &str = "Earnings Per Share - TTM - Current (LTM)";
const SRC_ROE: &str = "Return on Equity (ROE) - Current (LTM)";
const SRC_ROA: &str = "Return on Assets (ROA) - Current (LTM)";
const SRC_LEVERAGE: &str = "Financial Leverage (Assets/Equity) - Current (LTM)";

/// Loads and cleans one snapshot CSV file.
///
/// # Errors
///
/// Returns an error on I/O failure, a missing source column, or any cell
/// that fails numeric cleaning (the whole file is rejected).
pub fn load_snapshot(path: &Path) -> Result<FundamentalsTable> {
    let source = path.display().to_string();
    let text = fs::read_to_string(path)?;
    let table = parse_snapshot(&text, &source)?;
    info!("{}: {} records cleaned", source, table.len());
    Ok(table)
}

/// Cleans snapshot CSV text into a validated table.
///
/// `source` names the input in error messages.
///
/// # Errors
///
/// See [`load_snapshot`].
pub fn parse_snapshot(text: &str, source: &str) -> Result<FundamentalsTable> {
    let body: String = text
        .lines()
        .skip(BOILERPLATE_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
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

    let symbol_idx = column(SRC_SYMBOL)?;
    let name_idx = column(SRC_COMPANY_NAME)?;
    let industry_idx = column(SRC_INDUSTRY)?;
    let cap_idx = column(SRC_MARKET_CAP)?;
    let last_idx = column(SRC_LAST)?;
    let fcf_idx = column(SRC_FREE_CASH_FLOW)?;
    let bvps_idx = column(SRC_BOOK_VALUE)?;
    let eps_idx = column(SRC_EPS)?;
    let roe_idx = column(SRC_ROE)?;
    let roa_idx = column(SRC_ROA)?;
    let leverage_idx = column(SRC_LEVERAGE)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let symbol = cell(symbol_idx);
        if symbol.is_empty() {
            return Err(malformed(source, row, SRC_SYMBOL, "empty symbol"));
        }

        records.push(RawRecord {
            symbol: symbol.to_string(),
            company_name: cell(name_idx).to_string(),
            industry: cell(industry_idx).to_string(),
            market_cap_m: parse_market_cap(cell(cap_idx))
                .map_err(|c| malformed(source, row, SRC_MARKET_CAP, &c))?,
            current_price: parse_price(cell(last_idx))
                .map_err(|c| malformed(source, row, SRC_LAST, &c))?,
            free_cash_flow: parse_metric(cell(fcf_idx))
                .map_err(|c| malformed(source, row, SRC_FREE_CASH_FLOW, &c))?,
            book_value_per_share: parse_metric(cell(bvps_idx))
                .map_err(|c| malformed(source, row, SRC_BOOK_VALUE, &c))?,
            earnings_per_share: parse_metric(cell(eps_idx))
                .map_err(|c| malformed(source, row, SRC_EPS, &c))?,
            roe: parse_metric(cell(roe_idx))
                .map_err(|c| malformed(source, row, SRC_ROE, &c))?,
            roa: parse_metric(cell(roa_idx))
                .map_err(|c| malformed(source, row, SRC_ROA, &c))?,
            assets_to_equity: parse_metric(cell(leverage_idx))
                .map_err(|c| malformed(source, row, SRC_LEVERAGE, &c))?,
        });
    }

    Ok(FundamentalsTable::from_records(&records)?)
}

fn malformed(source: &str, row: usize, column: &str, cell: &str) -> IngestError {
    IngestError::Malformed {
        file: source.to_string(),
        reason: format!("row {}, column {:?}: {}", row + 1, column, cell),
    }
}

/// Strips currency formatting: `$`, thousands separators, and
/// accounting-style parenthesized negatives.
fn clean_number(cell: &str) -> String {
    cell.replace(['$', ')', ','], "").replace('(', "-")
}

/// Parses a metric cell; vendor empty markers become null.
fn parse_metric(cell: &str) -> std::result::Result<Option<f64>, String> {
    if cell.is_empty() || cell == "<empty>" {
        return Ok(None);
    }
    clean_number(cell)
        .parse::<f64>()
        .map(Some)
        .map_err(|_| cell.to_string())
}

/// Parses the last-price cell, which must be present.
fn parse_price(cell: &str) -> std::result::Result<f64, String> {
    if cell.is_empty() {
        return Err("empty price".to_string());
    }
    clean_number(cell).parse::<f64>().map_err(|_| cell.to_string())
}

/// Parses a market cap cell like `1,234 M` into integer millions.
fn parse_market_cap(cell: &str) -> std::result::Result<i64, String> {
    let token = cell
        .split_whitespace()
        .next()
        .ok_or_else(|| "empty market cap".to_string())?;
    token
        .replace(',', "")
        .parse::<i64>()
        .map_err(|_| cell.to_string())
}
