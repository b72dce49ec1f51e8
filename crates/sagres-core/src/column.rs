//! Column extraction helpers.
//!
//! Thin wrappers over Polars column access that translate lookup and dtype
//! failures into screener errors with the offending column name attached.

use polars::prelude::*;

use crate::error::{Result, ScreenError};

/// Materializes a nullable float column as a vector of optional values.
///
/// # Errors
///
/// Returns [`ScreenError::MissingColumn`] when the column is absent and
/// [`ScreenError::ColumnType`] when it is not `Float64`.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| ScreenError::MissingColumn(name.to_string()))?;
    let ca = column
        .as_materialized_series()
        .f64()
        .map_err(|_| ScreenError::ColumnType {
            column: name.to_string(),
            expected: "Float64",
        })?;
    Ok(ca.into_iter().collect())
}

/// Materializes a nullable string column as a vector of optional values.
///
/// # Errors
///
/// Returns [`ScreenError::MissingColumn`] when the column is absent and
/// [`ScreenError::ColumnType`] when it is not `String`.
pub fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| ScreenError::MissingColumn(name.to_string()))?;
    let ca = column
        .as_materialized_series()
        .str()
        .map_err(|_| ScreenError::ColumnType {
            column: name.to_string(),
            expected: "String",
        })?;
    Ok(ca.into_iter().map(|v| v.map(|s| s.to_string())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_values() {
        let df = df! {
            "x" => &[Some(1.0), None, Some(3.0)],
        }
        .unwrap();

        let values = f64_values(&df, "x").unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_missing_column() {
        let df = df! { "x" => &[1.0] }.unwrap();
        assert!(matches!(
            f64_values(&df, "y"),
            Err(ScreenError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_wrong_dtype() {
        let df = df! { "x" => &["a", "b"] }.unwrap();
        assert!(matches!(
            f64_values(&df, "x"),
            Err(ScreenError::ColumnType { .. })
        ));
    }

    #[test]
    fn test_str_values() {
        let df = df! { "s" => &[Some("a"), None] }.unwrap();
        let values = str_values(&df, "s").unwrap();
        assert_eq!(values, vec![Some("a".to_string()), None]);
    }
}
