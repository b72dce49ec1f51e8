//! Merging group statistics back onto instrument records.

use polars::prelude::*;

use sagres_core::{FundamentalsTable, MarketCapTier, Metric, Result, ScreenError, column, schema};

use crate::group::{GroupKey, GroupStats};

/// A fundamentals table with group statistic columns joined on.
///
/// Produced by [`merge`]: every record of the input table appears exactly
/// once, extended with one `{metric}_mean` and one `{metric}_std` column per
/// metric in the statistics' declared list. Records whose group was never
/// observed carry nulls in every stat column.
#[derive(Debug, Clone)]
pub struct MergedTable {
    data: DataFrame,
    metrics: Vec<Metric>,
}

impl MergedTable {
    /// Wraps a prebuilt merged frame.
    ///
    /// The frame must carry the canonical record columns plus a value, mean,
    /// and std column for every metric in `metrics`.
    ///
    /// # Errors
    ///
    /// Returns an error when a required column is missing or mistyped.
    pub fn new(data: DataFrame, metrics: Vec<Metric>) -> Result<Self> {
        sagres_core::table::validate_schema(&data)?;
        for metric in &metrics {
            for name in [metric.mean_column(), metric.std_column()] {
                let stat = data
                    .column(name)
                    .map_err(|_| ScreenError::MissingColumn(name.to_string()))?;
                if stat.dtype() != &DataType::Float64 {
                    return Err(ScreenError::ColumnType {
                        column: name.to_string(),
                        expected: "Float64",
                    });
                }
            }
        }
        Ok(Self { data, metrics })
    }

    /// Returns a reference to the underlying frame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// The metric list whose stat columns are present.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Consumes self and returns the underlying frame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stacks several merged tables (one per snapshot file) into one.
    ///
    /// # Errors
    ///
    /// Returns an error when `tables` is empty or the tables were merged
    /// over different metric lists.
    pub fn concat(tables: Vec<Self>) -> Result<Self> {
        let mut iter = tables.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| ScreenError::InvalidData("no tables to concatenate".to_string()))?;

        let mut data = first.data;
        for table in iter {
            if table.metrics != first.metrics {
                return Err(ScreenError::InvalidData(
                    "cannot concatenate tables with different metric lists".to_string(),
                ));
            }
            data = data.vstack(&table.data)?;
        }
        Ok(Self {
            data,
            metrics: first.metrics,
        })
    }
}

/// Left-joins group statistics onto each record by (tier, industry).
///
/// This is a pure relational join: the group key is unique in `stats` by
/// construction, so no row is duplicated, and records without a matching
/// group keep null stat columns. The input table is not modified.
///
/// # Errors
///
/// Returns an error when the group key columns are missing or a tier label
/// cannot be interpreted.
pub fn merge(table: &FundamentalsTable, stats: &GroupStats) -> Result<MergedTable> {
    let df = table.data();
    let tiers = column::str_values(df, schema::MARKET_CAP_GROUP)?;
    let industries = column::str_values(df, schema::INDUSTRY)?;
    let metrics = stats.metrics();

    let height = df.height();
    let mut mean_columns: Vec<Vec<Option<f64>>> =
        (0..metrics.len()).map(|_| Vec::with_capacity(height)).collect();
    let mut std_columns: Vec<Vec<Option<f64>>> =
        (0..metrics.len()).map(|_| Vec::with_capacity(height)).collect();

    for row in 0..height {
        let key = match (&tiers[row], &industries[row]) {
            (Some(tier_label), Some(industry)) => Some(GroupKey {
                tier: MarketCapTier::parse(tier_label)?,
                industry: industry.clone(),
            }),
            _ => None,
        };
        for (idx, metric) in metrics.iter().enumerate() {
            let entry = key.as_ref().and_then(|k| stats.get(k, *metric));
            mean_columns[idx].push(entry.map(|s| s.mean));
            std_columns[idx].push(entry.map(|s| s.std));
        }
    }

    let mut stat_columns = Vec::with_capacity(metrics.len() * 2);
    for (metric, means) in metrics.iter().zip(mean_columns) {
        stat_columns.push(Column::new(metric.mean_column().into(), means));
    }
    for (metric, stds) in metrics.iter().zip(std_columns) {
        stat_columns.push(Column::new(metric.std_column().into(), stds));
    }

    let data = df.hstack(&stat_columns)?;
    Ok(MergedTable {
        data,
        metrics: metrics.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupStatistics;
    use approx::assert_relative_eq;
    use sagres_core::RawRecord;

    fn record(symbol: &str, cap_m: i64, industry: &str, roe: Option<f64>) -> RawRecord {
        RawRecord {
            symbol: symbol.to_string(),
            company_name: format!("{symbol} Inc"),
            industry: industry.to_string(),
            market_cap_m: cap_m,
            current_price: 20.0,
            free_cash_flow: Some(4.0),
            book_value_per_share: Some(10.0),
            earnings_per_share: Some(2.0),
            roe,
            roa: Some(6.0),
            assets_to_equity: Some(1.5),
        }
    }

    #[test]
    fn test_every_record_kept_once() {
        let table = FundamentalsTable::from_records(&[
            record("AAA", 1_000, "Widgets", Some(10.0)),
            record("BBB", 1_200, "Widgets", Some(14.0)),
            record("CCC", 30_000, "Gadgets", Some(9.0)),
        ])
        .unwrap();
        let stats = GroupStatistics::default()
            .compute(&table, &Metric::ALL)
            .unwrap();

        let merged = merge(&table, &stats).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.data().width(),
            schema::COLUMN_ORDER.len() + Metric::ALL.len() * 2
        );
    }

    #[test]
    fn test_merged_stats_match_group_stats() {
        let table = FundamentalsTable::from_records(&[
            record("AAA", 1_000, "Widgets", Some(10.0)),
            record("BBB", 1_200, "Widgets", Some(14.0)),
        ])
        .unwrap();
        let stats = GroupStatistics::default()
            .compute(&table, &Metric::ALL)
            .unwrap();
        let merged = merge(&table, &stats).unwrap();

        let key = GroupKey {
            tier: MarketCapTier::Small,
            industry: "Widgets".to_string(),
        };
        let expected = stats.get(&key, Metric::ReturnOnEquity).unwrap();

        let means = column::f64_values(
            merged.data(),
            Metric::ReturnOnEquity.mean_column(),
        )
        .unwrap();
        let stds = column::f64_values(merged.data(), Metric::ReturnOnEquity.std_column())
            .unwrap();
        for row in 0..merged.len() {
            assert_relative_eq!(means[row].unwrap(), expected.mean);
            assert_relative_eq!(stds[row].unwrap(), expected.std);
        }
    }

    #[test]
    fn test_unmatched_group_carries_nulls() {
        let small = FundamentalsTable::from_records(&[record(
            "AAA",
            1_000,
            "Widgets",
            Some(10.0),
        )])
        .unwrap();
        let stats = GroupStatistics::default()
            .compute(&small, &Metric::ALL)
            .unwrap();

        // A table containing a record from a group the stats never saw.
        let other = FundamentalsTable::from_records(&[record(
            "ZZZ",
            50_000,
            "Shipping",
            Some(22.0),
        )])
        .unwrap();
        let merged = merge(&other, &stats).unwrap();

        let means = column::f64_values(
            merged.data(),
            Metric::ReturnOnEquity.mean_column(),
        )
        .unwrap();
        assert_eq!(means, vec![None]);
    }

    #[test]
    fn test_concat_stacks_rows() {
        let stats_table =
            FundamentalsTable::from_records(&[record("AAA", 1_000, "Widgets", Some(10.0))])
                .unwrap();
        let stats = GroupStatistics::default()
            .compute(&stats_table, &Metric::ALL)
            .unwrap();

        let first = merge(&stats_table, &stats).unwrap();
        let second_table =
            FundamentalsTable::from_records(&[record("BBB", 1_100, "Widgets", Some(12.0))])
                .unwrap();
        let second = merge(&second_table, &stats).unwrap();

        let combined = MergedTable::concat(vec![first, second]).unwrap();
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_concat_empty_is_error() {
        assert!(MergedTable::concat(Vec::new()).is_err());
    }
}
