//! CSV artifact writing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Writes a frame as a CSV artifact, creating parent directories as needed.
pub(crate) fn write_dataframe(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    writer.write_record(&names)?;

    let columns = df.get_columns();
    for row in 0..df.height() {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            cells.push(format_value(&column.get(row)?));
        }
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a bare symbol list as a one-column CSV artifact.
pub(crate) fn write_symbols(symbols: &[String], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["Symbol"])?;
    for symbol in symbols {
        writer.write_record([symbol.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn format_value(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::Float64(v) => format!("{v}"),
        AnyValue::Int64(v) => format!("{v}"),
        other => other.to_string(),
    }
}
