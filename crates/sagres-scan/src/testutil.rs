//! Test fixtures shared by the scanner tests.

use polars::prelude::*;

use sagres_core::{Metric, schema};
use sagres_stats::MergedTable;

/// One fixture row: metric values and joined group stats, in
/// [`Metric::ALL`] order (P/FCF, P/B, ROE, ROA, A/E, P/E).
pub(crate) struct MergedRow {
    pub(crate) symbol: &'static str,
    pub(crate) values: [Option<f64>; 6],
    pub(crate) means: [Option<f64>; 6],
    pub(crate) stds: [Option<f64>; 6],
}

pub(crate) fn merged_table(rows: &[MergedRow]) -> MergedTable {
    let n = rows.len();
    let symbols: Vec<&str> = rows.iter().map(|r| r.symbol).collect();

    let mut columns = vec![
        Column::new(schema::MARKET_CAP_GROUP.into(), vec!["Small"; n]),
        Column::new(schema::INDUSTRY.into(), vec!["Widgets"; n]),
        Column::new(schema::SYMBOL.into(), symbols),
        Column::new(schema::COMPANY_NAME.into(), vec!["Test Co"; n]),
        Column::new(schema::MARKET_CAP_M.into(), vec![1_000_i64; n]),
        Column::new(schema::CURRENT_PRICE.into(), vec![10.0_f64; n]),
    ];
    for (idx, metric) in Metric::ALL.iter().enumerate() {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.values[idx]).collect();
        columns.push(Column::new(metric.name().into(), values));
    }
    for (idx, metric) in Metric::ALL.iter().enumerate() {
        let means: Vec<Option<f64>> = rows.iter().map(|r| r.means[idx]).collect();
        columns.push(Column::new(metric.mean_column().into(), means));
    }
    for (idx, metric) in Metric::ALL.iter().enumerate() {
        let stds: Vec<Option<f64>> = rows.iter().map(|r| r.stds[idx]).collect();
        columns.push(Column::new(metric.std_column().into(), stds));
    }

    MergedTable::new(DataFrame::new(columns).unwrap(), Metric::ALL.to_vec()).unwrap()
}
