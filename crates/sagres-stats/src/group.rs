//! Peer-group statistics.
//!
//! Instruments are bucketed by (market cap tier, industry) and each metric's
//! IQR-trimmed mean and population standard deviation is computed per bucket,
//! independently per metric. A bucket with no usable values for a metric
//! simply carries no stats for that metric; records joined to it later fail
//! any predicate that needs them.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use sagres_core::stats::{DEFAULT_IQR_MULTIPLIER, TrimmedStats, iqr_trimmed_stats};
use sagres_core::{FundamentalsTable, MarketCapTier, Metric, Result, column, schema};

/// Configuration for peer-group statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupStatsConfig {
    /// Fence multiplier for IQR trimming (default: 1.5).
    pub iqr_multiplier: f64,
}

impl Default for GroupStatsConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }
}

/// The peer-group bucket an instrument belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    /// Market cap tier.
    pub tier: MarketCapTier,
    /// Industry classification label.
    pub industry: String,
}

/// Per-group trimmed statistics for a declared metric list.
///
/// Groups are keyed by [`GroupKey`] and held in deterministic order. Each
/// group carries one optional [`TrimmedStats`] per metric, in the order of
/// the metric list the statistics were computed over.
#[derive(Debug, Clone)]
pub struct GroupStats {
    metrics: Vec<Metric>,
    groups: BTreeMap<GroupKey, Vec<Option<TrimmedStats>>>,
}

impl GroupStats {
    /// The metric list these statistics were computed over.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Number of observed groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups were observed.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks up the trimmed stats for a group and metric.
    ///
    /// Returns `None` when the group was not observed, the metric is not in
    /// the declared list, or nothing survived trimming for that pair.
    pub fn get(&self, key: &GroupKey, metric: Metric) -> Option<TrimmedStats> {
        let idx = self.metrics.iter().position(|m| *m == metric)?;
        self.groups.get(key)?[idx]
    }

    /// Iterates over the observed group keys in deterministic order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    /// Exports the statistics as a frame: the group key columns followed by
    /// every metric's mean column, then every metric's std column.
    ///
    /// # Errors
    ///
    /// Returns an error if frame construction fails.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns = self.export_columns(true)?;
        Ok(DataFrame::new(columns)?)
    }

    /// Exports the group key columns and mean columns only, for the
    /// group-means artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if frame construction fails.
    pub fn means_dataframe(&self) -> Result<DataFrame> {
        let columns = self.export_columns(false)?;
        Ok(DataFrame::new(columns)?)
    }

    fn export_columns(&self, include_std: bool) -> Result<Vec<Column>> {
        let tiers: Vec<&str> = self.groups.keys().map(|k| k.tier.as_str()).collect();
        let industries: Vec<&str> = self.groups.keys().map(|k| k.industry.as_str()).collect();

        let mut columns = vec![
            Column::new(schema::MARKET_CAP_GROUP.into(), tiers),
            Column::new(schema::INDUSTRY.into(), industries),
        ];
        for (idx, metric) in self.metrics.iter().enumerate() {
            let means: Vec<Option<f64>> = self
                .groups
                .values()
                .map(|stats| stats[idx].map(|s| s.mean))
                .collect();
            columns.push(Column::new(metric.mean_column().into(), means));
        }
        if include_std {
            for (idx, metric) in self.metrics.iter().enumerate() {
                let stds: Vec<Option<f64>> = self
                    .groups
                    .values()
                    .map(|stats| stats[idx].map(|s| s.std))
                    .collect();
                columns.push(Column::new(metric.std_column().into(), stds));
            }
        }
        Ok(columns)
    }
}

/// Computes peer-group statistics over a fundamentals table.
#[derive(Debug, Clone, Default)]
pub struct GroupStatistics {
    config: GroupStatsConfig,
}

impl GroupStatistics {
    /// Creates a new computer with the given configuration.
    #[must_use]
    pub const fn new(config: GroupStatsConfig) -> Self {
        Self { config }
    }

    /// Computes trimmed stats per (tier, industry) group for each metric in
    /// `metrics`.
    ///
    /// Null metric values never enter a sample; a record with a null group
    /// key column is skipped entirely (it belongs to no observable group).
    ///
    /// # Errors
    ///
    /// Returns an error when a metric column is missing or mistyped, or a
    /// tier label cannot be interpreted.
    pub fn compute(&self, table: &FundamentalsTable, metrics: &[Metric]) -> Result<GroupStats> {
        let df = table.data();
        let tiers = column::str_values(df, schema::MARKET_CAP_GROUP)?;
        let industries = column::str_values(df, schema::INDUSTRY)?;
        let metric_values: Vec<Vec<Option<f64>>> = metrics
            .iter()
            .map(|m| column::f64_values(df, m.name()))
            .collect::<Result<_>>()?;

        let mut samples: BTreeMap<GroupKey, Vec<Vec<f64>>> = BTreeMap::new();
        for row in 0..df.height() {
            let (Some(tier_label), Some(industry)) = (&tiers[row], &industries[row]) else {
                continue;
            };
            let key = GroupKey {
                tier: MarketCapTier::parse(tier_label)?,
                industry: industry.clone(),
            };
            let bucket = samples
                .entry(key)
                .or_insert_with(|| vec![Vec::new(); metrics.len()]);
            for (idx, values) in metric_values.iter().enumerate() {
                if let Some(value) = values[row] {
                    bucket[idx].push(value);
                }
            }
        }

        let groups = samples
            .into_iter()
            .map(|(key, buckets)| {
                let stats = buckets
                    .iter()
                    .map(|values| iqr_trimmed_stats(values, self.config.iqr_multiplier))
                    .collect();
                (key, stats)
            })
            .collect();

        Ok(GroupStats {
            metrics: metrics.to_vec(),
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn small_widgets_key() -> GroupKey {
        GroupKey {
            tier: MarketCapTier::Small,
            industry: "Widgets".to_string(),
        }
    }

    #[test]
    fn test_groups_by_tier_and_industry() {
        let table = FundamentalsTable::from_records(&[
            record("AAA", 1_000, "Widgets", Some(10.0)),
            record("BBB", 1_200, "Widgets", Some(14.0)),
            record("CCC", 1_100, "Gadgets", Some(30.0)),
            record("DDD", 20_000, "Widgets", Some(8.0)),
        ])
        .unwrap();

        let stats = GroupStatistics::default()
            .compute(&table, &Metric::ALL)
            .unwrap();

        assert_eq!(stats.len(), 3);
        let roe = stats
            .get(&small_widgets_key(), Metric::ReturnOnEquity)
            .unwrap();
        assert_relative_eq!(roe.mean, 12.0);
        assert_relative_eq!(roe.std, 2.0);
        assert_eq!(roe.retained, 2);
    }

    #[test]
    fn test_outlier_trimmed_from_group() {
        let records: Vec<RawRecord> = [10.0, 12.0, 14.0, 16.0, 18.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, roe)| record(&format!("S{i}"), 500, "Widgets", Some(*roe)))
            .collect();
        let table = FundamentalsTable::from_records(&records).unwrap();

        let stats = GroupStatistics::default()
            .compute(&table, &[Metric::ReturnOnEquity])
            .unwrap();

        let roe = stats
            .get(&small_widgets_key(), Metric::ReturnOnEquity)
            .unwrap();
        assert_eq!(roe.retained, 5);
        assert_relative_eq!(roe.mean, 14.0);
    }

    #[test]
    fn test_single_member_group() {
        let table =
            FundamentalsTable::from_records(&[record("AAA", 1_000, "Widgets", Some(11.0))])
                .unwrap();
        let stats = GroupStatistics::default()
            .compute(&table, &Metric::ALL)
            .unwrap();

        let roe = stats
            .get(&small_widgets_key(), Metric::ReturnOnEquity)
            .unwrap();
        assert_relative_eq!(roe.mean, 11.0);
        assert_relative_eq!(roe.std, 0.0);
    }

    #[test]
    fn test_all_null_metric_has_no_stats() {
        let table = FundamentalsTable::from_records(&[
            record("AAA", 1_000, "Widgets", None),
            record("BBB", 1_200, "Widgets", None),
        ])
        .unwrap();
        let stats = GroupStatistics::default()
            .compute(&table, &Metric::ALL)
            .unwrap();

        // The group exists (other metrics have values) but carries no ROE
        // stats.
        assert!(stats.get(&small_widgets_key(), Metric::ReturnOnEquity).is_none());
        assert!(stats.get(&small_widgets_key(), Metric::PriceToBook).is_some());
    }

    #[test]
    fn test_unlisted_metric_returns_none() {
        let table =
            FundamentalsTable::from_records(&[record("AAA", 1_000, "Widgets", Some(11.0))])
                .unwrap();
        let stats = GroupStatistics::default()
            .compute(&table, &[Metric::ReturnOnEquity])
            .unwrap();
        assert!(stats.get(&small_widgets_key(), Metric::PriceToBook).is_none());
    }

    #[test]
    fn test_export_column_layout() {
        let table =
            FundamentalsTable::from_records(&[record("AAA", 1_000, "Widgets", Some(11.0))])
                .unwrap();
        let stats = GroupStatistics::default()
            .compute(&table, &Metric::ALL)
            .unwrap();

        let df = stats.to_dataframe().unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names[0], schema::MARKET_CAP_GROUP);
        assert_eq!(names[1], schema::INDUSTRY);
        assert_eq!(names[2], "P/FCF_mean");
        assert_eq!(names[8], "P/FCF_std");
        assert_eq!(names.len(), 2 + 12);

        let means = stats.means_dataframe().unwrap();
        assert_eq!(means.width(), 2 + 6);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let table = FundamentalsTable::from_records(&[
            record("AAA", 1_000, "Widgets", Some(10.0)),
            record("BBB", 1_200, "Widgets", Some(14.0)),
        ])
        .unwrap();

        let computer = GroupStatistics::default();
        let first = computer.compute(&table, &Metric::ALL).unwrap();
        let second = computer.compute(&table, &Metric::ALL).unwrap();

        for key in first.keys() {
            for metric in Metric::ALL {
                assert_eq!(first.get(key, metric), second.get(key, metric));
            }
        }
    }
}
