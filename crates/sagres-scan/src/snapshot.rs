//! Ad-hoc snapshot selection.

use std::collections::HashSet;

use polars::prelude::*;

use sagres_core::{Result, Symbol, column, schema};
use sagres_stats::MergedTable;

/// Filters a merged table down to the given symbols, with no scan criteria.
///
/// Used for ad-hoc inspection of a handful of names against their peer
/// groups. The output keeps the record columns and the group mean columns;
/// std columns are dropped. Symbols with no record simply contribute no
/// rows.
///
/// # Errors
///
/// Returns an error when the merged table lacks a needed column.
pub fn snapshot(merged: &MergedTable, symbols: &[Symbol]) -> Result<DataFrame> {
    let df = merged.data();
    let wanted: HashSet<&str> = symbols.iter().map(String::as_str).collect();

    let table_symbols = column::str_values(df, schema::SYMBOL)?;
    let mask: BooleanChunked = table_symbols
        .iter()
        .map(|s| s.as_deref().is_some_and(|s| wanted.contains(s)))
        .collect();
    let selected = df.filter(&mask)?;

    let mut output: Vec<&str> = schema::COLUMN_ORDER.to_vec();
    output.extend(merged.metrics().iter().map(|m| m.mean_column()));
    Ok(selected.select(output)?)
}
