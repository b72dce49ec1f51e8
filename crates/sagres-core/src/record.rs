//! Typed per-instrument records.

use serde::{Deserialize, Serialize};

use crate::tier::MarketCapTier;

/// One cleaned instrument row from a market snapshot file.
///
/// Raw ratios are nullable: a data vendor may report no free cash flow or
/// earnings figure for a given name. Derived price ratios are computed from
/// these fields with any non-finite result (division by zero book value,
/// say) collapsed to `None`, so downstream comparisons never see an
/// infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Ticker symbol.
    pub symbol: String,
    /// Full company name.
    pub company_name: String,
    /// Industry classification label.
    pub industry: String,
    /// Market capitalization in millions.
    pub market_cap_m: i64,
    /// Last traded price.
    pub current_price: f64,
    /// Free cash flow per share.
    pub free_cash_flow: Option<f64>,
    /// Book value per share.
    pub book_value_per_share: Option<f64>,
    /// Earnings per share.
    pub earnings_per_share: Option<f64>,
    /// Return on equity, percent.
    pub roe: Option<f64>,
    /// Return on assets, percent.
    pub roa: Option<f64>,
    /// Financial leverage, assets over equity.
    pub assets_to_equity: Option<f64>,
}

impl RawRecord {
    /// The market cap tier this record falls in.
    #[must_use]
    pub const fn tier(&self) -> MarketCapTier {
        MarketCapTier::from_market_cap_m(self.market_cap_m)
    }

    /// Price to free cash flow, `None` when undefined.
    #[must_use]
    pub fn price_to_fcf(&self) -> Option<f64> {
        safe_ratio(self.current_price, self.free_cash_flow)
    }

    /// Price to book value, `None` when undefined.
    #[must_use]
    pub fn price_to_book(&self) -> Option<f64> {
        safe_ratio(self.current_price, self.book_value_per_share)
    }

    /// Price to earnings, `None` when undefined.
    #[must_use]
    pub fn price_to_earnings(&self) -> Option<f64> {
        safe_ratio(self.current_price, self.earnings_per_share)
    }
}

/// Divides `numerator` by an optional denominator, collapsing any
/// non-finite quotient to `None`.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: Option<f64>) -> Option<f64> {
    let quotient = numerator / denominator?;
    quotient.is_finite().then_some(quotient)
}
