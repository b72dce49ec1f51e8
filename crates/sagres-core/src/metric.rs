//! Metric column descriptors.
//!
//! Every ratio the screener aggregates is declared here as an enumerated
//! descriptor carrying its value, group-mean, group-std, and z-score column
//! names. Stages iterate over a declared metric list rather than pattern
//! matching on column-name suffixes, so the set of derived columns is always
//! explicit.

use std::fmt;

use crate::schema;

/// A fundamental ratio tracked per instrument and aggregated per peer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Price to free cash flow per share.
    PriceToFcf,
    /// Price to book value per share.
    PriceToBook,
    /// Return on equity.
    ReturnOnEquity,
    /// Return on assets.
    ReturnOnAssets,
    /// Financial leverage (assets over equity).
    AssetsToEquity,
    /// Price to earnings per share.
    PriceToEarnings,
}

impl Metric {
    /// All metrics, in canonical table order.
    pub const ALL: [Self; 6] = [
        Self::PriceToFcf,
        Self::PriceToBook,
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
        Self::AssetsToEquity,
        Self::PriceToEarnings,
    ];

    /// The value column name for this metric.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PriceToFcf => schema::PRICE_TO_FCF,
            Self::PriceToBook => schema::PRICE_TO_BOOK,
            Self::ReturnOnEquity => schema::ROE,
            Self::ReturnOnAssets => schema::ROA,
            Self::AssetsToEquity => schema::ASSETS_TO_EQUITY,
            Self::PriceToEarnings => schema::PRICE_TO_EARNINGS,
        }
    }

    /// The group-mean column name for this metric.
    #[must_use]
    pub const fn mean_column(self) -> &'static str {
        match self {
            Self::PriceToFcf => "P/FCF_mean",
            Self::PriceToBook => "P/B_mean",
            Self::ReturnOnEquity => "ROE_mean",
            Self::ReturnOnAssets => "ROA_mean",
            Self::AssetsToEquity => "A/E_mean",
            Self::PriceToEarnings => "P/E_mean",
        }
    }

    /// The group standard deviation column name for this metric.
    #[must_use]
    pub const fn std_column(self) -> &'static str {
        match self {
            Self::PriceToFcf => "P/FCF_std",
            Self::PriceToBook => "P/B_std",
            Self::ReturnOnEquity => "ROE_std",
            Self::ReturnOnAssets => "ROA_std",
            Self::AssetsToEquity => "A/E_std",
            Self::PriceToEarnings => "P/E_std",
        }
    }

    /// The z-score column name for this metric.
    #[must_use]
    pub const fn zscore_column(self) -> &'static str {
        match self {
            Self::PriceToFcf => "P/FCF_ZS",
            Self::PriceToBook => "P/B_ZS",
            Self::ReturnOnEquity => "ROE_ZS",
            Self::ReturnOnAssets => "ROA_ZS",
            Self::AssetsToEquity => "A/E_ZS",
            Self::PriceToEarnings => "P/E_ZS",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_are_consistent() {
        for metric in Metric::ALL {
            assert_eq!(metric.mean_column(), format!("{}_mean", metric.name()));
            assert_eq!(metric.std_column(), format!("{}_std", metric.name()));
            assert_eq!(metric.zscore_column(), format!("{}_ZS", metric.name()));
        }
    }

    #[test]
    fn test_all_metrics_are_distinct() {
        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Metric::PriceToFcf.to_string(), "P/FCF");
        assert_eq!(Metric::AssetsToEquity.to_string(), "A/E");
    }
}
