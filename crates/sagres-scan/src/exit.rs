//! Exit scan: held positions showing overvaluation or deterioration.

use std::collections::HashSet;

use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use sagres_core::{Metric, Result, Symbol, column, schema};
use sagres_stats::MergedTable;

use crate::predicate;

/// Overvaluation signal count column name.
pub const OVERVALUATION: &str = "Overvaluation";

/// Bad quality signal count column name.
pub const BAD_QUALITY: &str = "Bad Quality";

/// Metric order of the exit report's value/mean column pairs.
///
/// Downstream formatting addresses these columns by position, so the order
/// is a contract.
pub const EXIT_METRIC_ORDER: [Metric; 6] = [
    Metric::PriceToFcf,
    Metric::PriceToBook,
    Metric::PriceToEarnings,
    Metric::ReturnOnEquity,
    Metric::ReturnOnAssets,
    Metric::AssetsToEquity,
];

/// Thresholds for the exit scan's quality floors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExitConfig {
    /// ROE floor, percent (default: 10).
    pub min_roe: f64,
    /// ROA floor, percent (default: 5).
    pub min_roa: f64,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            min_roe: 10.0,
            min_roa: 5.0,
        }
    }
}

/// Result of an exit scan over held positions.
#[derive(Debug, Clone)]
pub struct ExitReport {
    /// Held symbols with no record in the screening universe, in held-list
    /// order. Typically positions whose market cap drifted out of the
    /// screened range since the snapshot was taken.
    pub out_of_scanner: Vec<Symbol>,
    /// Held positions with at least one exit signal.
    pub signals: DataFrame,
}

/// Scans held positions for exit signals against a merged table.
///
/// Held symbols absent from the table are reported separately as
/// out-of-scanner rather than scanned; every matching row of the remaining
/// symbols (a symbol can appear once per snapshot file) is scored on two
/// independent counters and kept when either is nonzero.
#[derive(Debug, Clone, Default)]
pub struct ExitScanner {
    config: ExitConfig,
}

impl ExitScanner {
    /// Creates a scanner with the given thresholds.
    #[must_use]
    pub const fn new(config: ExitConfig) -> Self {
        Self { config }
    }

    /// Runs the exit scan for the given held symbols.
    ///
    /// # Errors
    ///
    /// Returns an error when the merged table lacks a needed column. A scan
    /// in which no position signals returns an empty frame, not an error.
    pub fn scan(&self, merged: &MergedTable, held: &[Symbol]) -> Result<ExitReport> {
        let df = merged.data();
        let symbols = column::str_values(df, schema::SYMBOL)?;
        let present: HashSet<&str> = symbols
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();

        let mut reported: HashSet<&str> = HashSet::new();
        let out_of_scanner: Vec<Symbol> = held
            .iter()
            .filter(|s| !present.contains(s.as_str()))
            .filter(|s| reported.insert(s.as_str()))
            .cloned()
            .collect();

        let held_set: HashSet<&str> = held.iter().map(String::as_str).collect();
        let mask: BooleanChunked = symbols
            .iter()
            .map(|s| s.as_deref().is_some_and(|s| held_set.contains(s)))
            .collect();
        let positions = df.filter(&mask)?;
        debug!(
            "exit scan: {} held rows, {} symbols out of scanner",
            positions.height(),
            out_of_scanner.len()
        );

        let signals = self.signal_table(&positions)?;
        Ok(ExitReport {
            out_of_scanner,
            signals,
        })
    }

    fn signal_table(&self, positions: &DataFrame) -> Result<DataFrame> {
        let pfcf = column::f64_values(positions, Metric::PriceToFcf.name())?;
        let pfcf_mean = column::f64_values(positions, Metric::PriceToFcf.mean_column())?;
        let pb = column::f64_values(positions, Metric::PriceToBook.name())?;
        let pb_mean = column::f64_values(positions, Metric::PriceToBook.mean_column())?;
        let pe = column::f64_values(positions, Metric::PriceToEarnings.name())?;
        let pe_mean = column::f64_values(positions, Metric::PriceToEarnings.mean_column())?;
        let roe = column::f64_values(positions, Metric::ReturnOnEquity.name())?;
        let roe_mean = column::f64_values(positions, Metric::ReturnOnEquity.mean_column())?;
        let roa = column::f64_values(positions, Metric::ReturnOnAssets.name())?;
        let roa_mean = column::f64_values(positions, Metric::ReturnOnAssets.mean_column())?;

        let height = positions.height();
        let mut overvaluation = Vec::with_capacity(height);
        let mut bad_quality = Vec::with_capacity(height);
        for i in 0..height {
            let over = i64::from(predicate::at_least_mean(pfcf[i], pfcf_mean[i]))
                + i64::from(predicate::at_least_mean(pb[i], pb_mean[i]))
                + i64::from(predicate::at_least_mean(pe[i], pe_mean[i]));

            let bad = i64::from(predicate::below(roe[i], self.config.min_roe))
                + i64::from(predicate::below(roa[i], self.config.min_roa))
                + i64::from(predicate::under_mean(roe[i], roe_mean[i]))
                + i64::from(predicate::under_mean(roa[i], roa_mean[i]))
                + i64::from(predicate::at_most(pfcf[i], 0.0))
                + i64::from(predicate::at_most(pe[i], 0.0));

            overvaluation.push(over);
            bad_quality.push(bad);
        }

        let flagged: Vec<usize> = (0..height)
            .filter(|&i| overvaluation[i] >= 1 || bad_quality[i] >= 1)
            .collect();

        let position_symbols = column::str_values(positions, schema::SYMBOL)?;
        let industries = column::str_values(positions, schema::INDUSTRY)?;

        let mut columns = vec![
            Column::new(
                schema::SYMBOL.into(),
                flagged
                    .iter()
                    .map(|&i| position_symbols[i].clone())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                schema::INDUSTRY.into(),
                flagged
                    .iter()
                    .map(|&i| industries[i].clone())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                OVERVALUATION.into(),
                flagged.iter().map(|&i| overvaluation[i]).collect::<Vec<_>>(),
            ),
            Column::new(
                BAD_QUALITY.into(),
                flagged.iter().map(|&i| bad_quality[i]).collect::<Vec<_>>(),
            ),
        ];
        for metric in EXIT_METRIC_ORDER {
            let values = column::f64_values(positions, metric.name())?;
            let means = column::f64_values(positions, metric.mean_column())?;
            let rounded_values: Vec<Option<f64>> = flagged
                .iter()
                .map(|&i| values[i].map(round2))
                .collect();
            let rounded_means: Vec<Option<f64>> =
                flagged.iter().map(|&i| means[i].map(round2)).collect();
            columns.push(Column::new(metric.name().into(), rounded_values));
            columns.push(Column::new(metric.mean_column().into(), rounded_means));
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Rounds to two decimal places for report output.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
