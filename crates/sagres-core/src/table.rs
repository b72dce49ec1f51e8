//! The cleaned fundamentals table.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::{Result, ScreenError};
use crate::record::RawRecord;
use crate::schema;

/// An in-memory table of per-instrument fundamental records.
///
/// `FundamentalsTable` wraps a Polars `DataFrame` whose schema has been
/// validated against the canonical column contract ([`schema::COLUMN_ORDER`]):
/// string identity columns, an integer market cap, a float price, and the six
/// nullable float metric columns. Construction rejects the whole table when
/// any column is missing or mistyped; the screener never computes group
/// statistics over a partially valid population.
///
/// # Example
///
/// ```no_run
/// use polars::prelude::*;
/// use sagres_core::FundamentalsTable;
///
/// let df = DataFrame::default();
/// let table = FundamentalsTable::new(df); // Err: columns missing
/// ```
#[derive(Debug, Clone)]
pub struct FundamentalsTable {
    data: DataFrame,
}

impl FundamentalsTable {
    /// Wraps a prebuilt frame after validating the column contract.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::MissingColumn`] or [`ScreenError::ColumnType`]
    /// when the frame does not satisfy the schema.
    pub fn new(data: DataFrame) -> Result<Self> {
        validate_schema(&data)?;
        Ok(Self { data })
    }

    /// Builds a table from typed records, deriving the price ratio and
    /// market cap tier columns.
    ///
    /// Non-finite ratio quotients are stored as null. Symbols must be unique
    /// within the input (one snapshot file); duplicates reject the table.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidData`] on duplicate symbols.
    pub fn from_records(records: &[RawRecord]) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.symbol.as_str()) {
                return Err(ScreenError::InvalidData(format!(
                    "duplicate symbol in snapshot: {}",
                    record.symbol
                )));
            }
        }

        let tiers: Vec<&str> = records.iter().map(|r| r.tier().as_str()).collect();
        let industries: Vec<&str> = records.iter().map(|r| r.industry.as_str()).collect();
        let symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        let names: Vec<&str> = records.iter().map(|r| r.company_name.as_str()).collect();
        let caps: Vec<i64> = records.iter().map(|r| r.market_cap_m).collect();
        let prices: Vec<f64> = records.iter().map(|r| r.current_price).collect();
        let pfcf: Vec<Option<f64>> = records.iter().map(RawRecord::price_to_fcf).collect();
        let pb: Vec<Option<f64>> = records.iter().map(RawRecord::price_to_book).collect();
        let roe: Vec<Option<f64>> = records.iter().map(|r| r.roe).collect();
        let roa: Vec<Option<f64>> = records.iter().map(|r| r.roa).collect();
        let ae: Vec<Option<f64>> = records.iter().map(|r| r.assets_to_equity).collect();
        let pe: Vec<Option<f64>> = records.iter().map(RawRecord::price_to_earnings).collect();

        let data = df! {
            schema::MARKET_CAP_GROUP => tiers,
            schema::INDUSTRY => industries,
            schema::SYMBOL => symbols,
            schema::COMPANY_NAME => names,
            schema::MARKET_CAP_M => caps,
            schema::CURRENT_PRICE => prices,
            schema::PRICE_TO_FCF => pfcf,
            schema::PRICE_TO_BOOK => pb,
            schema::ROE => roe,
            schema::ROA => roa,
            schema::ASSETS_TO_EQUITY => ae,
            schema::PRICE_TO_EARNINGS => pe,
        }?;

        Ok(Self { data })
    }

    /// Returns a reference to the underlying frame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying frame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<DataFrame> for FundamentalsTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

/// Validates the canonical column contract on a frame.
///
/// Extra columns are permitted; tables that extend the base schema (merged
/// stat columns, scan outputs) validate their record columns through this.
///
/// # Errors
///
/// Returns [`ScreenError::MissingColumn`] or [`ScreenError::ColumnType`] on
/// the first violation.
pub fn validate_schema(df: &DataFrame) -> Result<()> {
    const STRING_COLUMNS: [&str; 4] = [
        schema::MARKET_CAP_GROUP,
        schema::INDUSTRY,
        schema::SYMBOL,
        schema::COMPANY_NAME,
    ];
    const FLOAT_COLUMNS: [&str; 7] = [
        schema::CURRENT_PRICE,
        schema::PRICE_TO_FCF,
        schema::PRICE_TO_BOOK,
        schema::ROE,
        schema::ROA,
        schema::ASSETS_TO_EQUITY,
        schema::PRICE_TO_EARNINGS,
    ];

    for name in STRING_COLUMNS {
        expect_dtype(df, name, &DataType::String, "String")?;
    }
    expect_dtype(df, schema::MARKET_CAP_M, &DataType::Int64, "Int64")?;
    for name in FLOAT_COLUMNS {
        expect_dtype(df, name, &DataType::Float64, "Float64")?;
    }
    Ok(())
}

fn expect_dtype(
    df: &DataFrame,
    name: &str,
    dtype: &DataType,
    expected: &'static str,
) -> Result<()> {
    let column = df
        .column(name)
        .map_err(|_| ScreenError::MissingColumn(name.to_string()))?;
    if column.dtype() != dtype {
        return Err(ScreenError::ColumnType {
            column: name.to_string(),
            expected,
        });
    }
    Ok(())
}
