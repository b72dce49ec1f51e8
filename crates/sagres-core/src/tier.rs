//! Market capitalization tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// Market capitalization tier of an instrument.
///
/// Tiers bucket instruments by size so that valuation ratios are only ever
/// compared against peers of similar scale. The tier is a pure function of
/// market cap in millions:
///
/// - `Small`: below 2 000 M
/// - `Mid`: 2 000 M up to but excluding 10 000 M
/// - `Large`: 10 000 M and above
///
/// The 2 000 M boundary belongs to `Mid`; the bands are non-overlapping and
/// exhaustive over the integer market caps the screener ingests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MarketCapTier {
    /// Small cap, below 2 000 M.
    Small,
    /// Mid cap, 2 000 M to just under 10 000 M.
    Mid,
    /// Large cap, 10 000 M and above.
    Large,
}

impl MarketCapTier {
    /// Lower bound of the mid cap band, in millions.
    pub const MID_LOWER_M: i64 = 2_000;

    /// Lower bound of the large cap band, in millions.
    pub const LARGE_LOWER_M: i64 = 10_000;

    /// Classifies a market cap (in millions) into its tier.
    #[must_use]
    pub const fn from_market_cap_m(market_cap_m: i64) -> Self {
        if market_cap_m >= Self::LARGE_LOWER_M {
            Self::Large
        } else if market_cap_m >= Self::MID_LOWER_M {
            Self::Mid
        } else {
            Self::Small
        }
    }

    /// The tier label used in table columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Mid => "Mid",
            Self::Large => "Large",
        }
    }

    /// Parses a tier label as it appears in a table column.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnknownMarketCapGroup`] for any other label.
    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "Small" => Ok(Self::Small),
            "Mid" => Ok(Self::Mid),
            "Large" => Ok(Self::Large),
            other => Err(ScreenError::UnknownMarketCapGroup(other.to_string())),
        }
    }
}

impl fmt::Display for MarketCapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MarketCapTier::from_market_cap_m(250), MarketCapTier::Small);
        assert_eq!(MarketCapTier::from_market_cap_m(1999), MarketCapTier::Small);
        assert_eq!(MarketCapTier::from_market_cap_m(2000), MarketCapTier::Mid);
        assert_eq!(MarketCapTier::from_market_cap_m(9999), MarketCapTier::Mid);
        assert_eq!(MarketCapTier::from_market_cap_m(10000), MarketCapTier::Large);
        assert_eq!(
            MarketCapTier::from_market_cap_m(250_000),
            MarketCapTier::Large
        );
    }

    #[test]
    fn test_tier_is_deterministic() {
        for cap in [0, 1999, 2000, 5000, 9999, 10000, 50000] {
            assert_eq!(
                MarketCapTier::from_market_cap_m(cap),
                MarketCapTier::from_market_cap_m(cap)
            );
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for tier in [MarketCapTier::Small, MarketCapTier::Mid, MarketCapTier::Large] {
            assert_eq!(MarketCapTier::parse(tier.as_str()).unwrap(), tier);
        }
        assert!(MarketCapTier::parse("Mega").is_err());
    }
}
