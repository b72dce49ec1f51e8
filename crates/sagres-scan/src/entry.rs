//! Entry scan: undervalued candidates.
//!
//! The entry scan keeps records that are cheap relative to their peer group
//! on cash flow and book value while clearing absolute quality floors, then
//! attaches z-scores and a composite score so candidates can be ranked.

use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use sagres_core::{Metric, Result, column, schema};
use sagres_stats::MergedTable;

use crate::predicate;

/// Composite score column name in the entry scan output.
pub const SCORE: &str = "Score";

/// Thresholds for the entry scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Minimum return on equity, percent (default: 10).
    pub min_roe: f64,
    /// Minimum return on assets, percent (default: 5).
    pub min_roa: f64,
    /// Minimum financial leverage (default: 1).
    pub min_assets_to_equity: f64,
    /// Discount factor on the P/B group mean scored as deep value
    /// (default: 0.7, strict comparison).
    pub pb_discount: f64,
    /// Inclusive P/E band scored as reasonably priced (default: 1 to 25).
    pub pe_band: (f64, f64),
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            min_roe: 10.0,
            min_roa: 5.0,
            min_assets_to_equity: 1.0,
            pb_discount: 0.7,
            pe_band: (1.0, 25.0),
        }
    }
}

/// Scans a merged table for entry candidates.
///
/// A record qualifies only when every criterion holds; an undefined operand
/// (missing ratio, or no group stats) fails its criterion. Survivors carry
/// one z-score column per metric and an integer `Score` of 0 to 5; the
/// intermediate `_mean`/`_std` columns are dropped from the output.
#[derive(Debug, Clone, Default)]
pub struct EntryScanner {
    config: EntryConfig,
}

impl EntryScanner {
    /// Creates a scanner with the given thresholds.
    #[must_use]
    pub const fn new(config: EntryConfig) -> Self {
        Self { config }
    }

    /// Runs the entry scan.
    ///
    /// # Errors
    ///
    /// Returns an error when the merged table lacks a metric value or stat
    /// column. A scan in which no record qualifies returns an empty frame,
    /// not an error.
    pub fn scan(&self, merged: &MergedTable) -> Result<DataFrame> {
        let df = merged.data();

        let pfcf = column::f64_values(df, Metric::PriceToFcf.name())?;
        let pfcf_mean = column::f64_values(df, Metric::PriceToFcf.mean_column())?;
        let pb = column::f64_values(df, Metric::PriceToBook.name())?;
        let pb_mean = column::f64_values(df, Metric::PriceToBook.mean_column())?;
        let roe = column::f64_values(df, Metric::ReturnOnEquity.name())?;
        let roa = column::f64_values(df, Metric::ReturnOnAssets.name())?;
        let ae = column::f64_values(df, Metric::AssetsToEquity.name())?;
        let ae_mean = column::f64_values(df, Metric::AssetsToEquity.mean_column())?;
        let pe = column::f64_values(df, Metric::PriceToEarnings.name())?;

        let mask: BooleanChunked = (0..df.height())
            .map(|i| {
                predicate::above(pfcf[i], 0.0)
                    && predicate::under_mean(pfcf[i], pfcf_mean[i])
                    && predicate::above(pb[i], 0.0)
                    && predicate::under_mean(pb[i], pb_mean[i])
                    && predicate::above(roe[i], self.config.min_roe)
                    && predicate::above(roa[i], self.config.min_roa)
                    && predicate::above(ae[i], self.config.min_assets_to_equity)
                    && predicate::under_mean(ae[i], ae_mean[i])
                    && predicate::above(pe[i], 0.0)
            })
            .collect();
        let survivors = df.filter(&mask)?;
        debug!(
            "entry scan kept {} of {} records",
            survivors.height(),
            df.height()
        );

        let scored = self.attach_scores(survivors, merged.metrics())?;

        let mut output: Vec<&str> = schema::COLUMN_ORDER.to_vec();
        output.extend(merged.metrics().iter().map(|m| m.zscore_column()));
        output.push(SCORE);
        Ok(scored.select(output)?)
    }

    fn attach_scores(&self, survivors: DataFrame, metrics: &[Metric]) -> Result<DataFrame> {
        let mut zscore_columns = Vec::with_capacity(metrics.len());
        for metric in metrics {
            let values = column::f64_values(&survivors, metric.name())?;
            let means = column::f64_values(&survivors, metric.mean_column())?;
            let stds = column::f64_values(&survivors, metric.std_column())?;
            let zs: Vec<Option<f64>> = (0..survivors.height())
                .map(|i| predicate::zscore(values[i], means[i], stds[i]))
                .collect();
            zscore_columns.push(Column::new(metric.zscore_column().into(), zs));
        }

        let pb = column::f64_values(&survivors, Metric::PriceToBook.name())?;
        let pb_mean = column::f64_values(&survivors, Metric::PriceToBook.mean_column())?;
        let roe = column::f64_values(&survivors, Metric::ReturnOnEquity.name())?;
        let roe_mean = column::f64_values(&survivors, Metric::ReturnOnEquity.mean_column())?;
        let roa = column::f64_values(&survivors, Metric::ReturnOnAssets.name())?;
        let roa_mean = column::f64_values(&survivors, Metric::ReturnOnAssets.mean_column())?;
        let pe = column::f64_values(&survivors, Metric::PriceToEarnings.name())?;
        let pe_mean = column::f64_values(&survivors, Metric::PriceToEarnings.mean_column())?;

        let (pe_low, pe_high) = self.config.pe_band;
        let scores: Vec<i64> = (0..survivors.height())
            .map(|i| {
                let discounted = pb_mean[i].map(|m| self.config.pb_discount * m);
                let mut score = 0;
                score += i64::from(predicate::under_mean(pb[i], discounted));
                score += i64::from(predicate::over_mean(roe[i], roe_mean[i]));
                score += i64::from(predicate::over_mean(roa[i], roa_mean[i]));
                score += i64::from(predicate::under_mean(pe[i], pe_mean[i]));
                score += i64::from(
                    pe[i].is_some_and(|v| v >= pe_low && v <= pe_high),
                );
                score
            })
            .collect();
        zscore_columns.push(Column::new(SCORE.into(), scores));

        Ok(survivors.hstack(&zscore_columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MergedRow, merged_table};
    use approx::assert_relative_eq;

    // Values and stats in Metric::ALL order: P/FCF, P/B, ROE, ROA, A/E, P/E.
    fn qualifying_row(symbol: &'static str) -> MergedRow {
        MergedRow {
            symbol,
            values: [
                Some(5.0),
                Some(1.0),
                Some(15.0),
                Some(6.0),
                Some(1.5),
                Some(10.0),
            ],
            means: [
                Some(8.0),
                Some(2.0),
                Some(12.0),
                Some(4.0),
                Some(2.0),
                Some(20.0),
            ],
            stds: [Some(1.0); 6],
        }
    }

    #[test]
    fn test_qualifying_record_passes() {
        let merged = merged_table(&[qualifying_row("AAA")]);
        let result = EntryScanner::default().scan(&merged).unwrap();
        assert_eq!(result.height(), 1);

        // Intermediate stat columns are gone from the output.
        let names: Vec<String> = result
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(!names.iter().any(|n| n.ends_with("_mean")));
        assert!(!names.iter().any(|n| n.ends_with("_std")));
        assert_eq!(names.last().map(String::as_str), Some(SCORE));
    }

    #[test]
    fn test_low_roe_is_excluded() {
        let mut row = qualifying_row("AAA");
        row.values[2] = Some(9.0);
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();
        assert_eq!(result.height(), 0);
    }

    #[test]
    fn test_undefined_operand_fails_predicate() {
        let mut row = qualifying_row("AAA");
        row.means[4] = None; // no A/E group mean
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();
        assert_eq!(result.height(), 0);
    }

    #[test]
    fn test_negative_pfcf_is_excluded() {
        let mut row = qualifying_row("AAA");
        row.values[0] = Some(-5.0);
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();
        assert_eq!(result.height(), 0);
    }

    #[test]
    fn test_score_counts_criteria() {
        // P/B = 1.0 < 0.7 * 2.0, ROE above mean, ROA above mean, P/E below
        // mean, P/E inside the band: all five criteria hold.
        let merged = merged_table(&[qualifying_row("AAA")]);
        let result = EntryScanner::default().scan(&merged).unwrap();

        let scores: Vec<Option<i64>> = result
            .column(SCORE)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(scores, vec![Some(5)]);
    }

    #[test]
    fn test_pb_discount_boundary_is_strict() {
        // P/B exactly at 0.7 * mean must not score the deep-value point.
        let mut row = qualifying_row("AAA");
        row.values[1] = Some(1.4);
        row.means[1] = Some(2.0);
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();

        let scores: Vec<Option<i64>> = result
            .column(SCORE)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(scores, vec![Some(4)]);
    }

    #[test]
    fn test_pe_band_is_inclusive() {
        let mut row = qualifying_row("AAA");
        row.values[5] = Some(25.0);
        row.means[5] = Some(30.0);
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();

        let scores: Vec<Option<i64>> = result
            .column(SCORE)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(scores, vec![Some(5)]);
    }

    #[test]
    fn test_zscores_attached() {
        let merged = merged_table(&[qualifying_row("AAA")]);
        let result = EntryScanner::default().scan(&merged).unwrap();

        let roe_zs = sagres_core::column::f64_values(
            &result,
            Metric::ReturnOnEquity.zscore_column(),
        )
        .unwrap();
        // (15 - 12) / 1
        assert_relative_eq!(roe_zs[0].unwrap(), 3.0);
    }

    #[test]
    fn test_zero_std_zscore_is_undefined() {
        let mut row = qualifying_row("AAA");
        row.stds[2] = Some(0.0);
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();

        let roe_zs = sagres_core::column::f64_values(
            &result,
            Metric::ReturnOnEquity.zscore_column(),
        )
        .unwrap();
        assert_eq!(roe_zs, vec![None]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut row = qualifying_row("AAA");
        row.values = [None; 6];
        let merged = merged_table(&[row]);
        let result = EntryScanner::default().scan(&merged).unwrap();
        assert_eq!(result.height(), 0);
    }
}
