//! Canonical column names for screener tables.
//!
//! The names below are a data contract: they flow unchanged from the cleaned
//! input table through the statistics and scan stages into the output
//! artifacts, where downstream consumers reference columns by name and
//! position.

/// Market cap tier label column (`Small`, `Mid`, `Large`).
pub const MARKET_CAP_GROUP: &str = "Market Cap Group";

/// Industry classification column.
pub const INDUSTRY: &str = "Industry";

/// Ticker symbol column. Unique within a snapshot file.
pub const SYMBOL: &str = "Symbol";

/// Full company name column.
pub const COMPANY_NAME: &str = "Company Name";

/// Market capitalization in millions, integer.
pub const MARKET_CAP_M: &str = "Market Cap (M)";

/// Last traded price column.
pub const CURRENT_PRICE: &str = "Current Price";

/// Price to free cash flow per share.
pub const PRICE_TO_FCF: &str = "P/FCF";

/// Price to book value per share.
pub const PRICE_TO_BOOK: &str = "P/B";

/// Return on equity, in percent.
pub const ROE: &str = "ROE";

/// Return on assets, in percent.
pub const ROA: &str = "ROA";

/// Financial leverage (assets over equity).
pub const ASSETS_TO_EQUITY: &str = "A/E";

/// Price to earnings per share.
pub const PRICE_TO_EARNINGS: &str = "P/E";

/// Column order of a cleaned fundamentals table.
pub const COLUMN_ORDER: [&str; 12] = [
    MARKET_CAP_GROUP,
    INDUSTRY,
    SYMBOL,
    COMPANY_NAME,
    MARKET_CAP_M,
    CURRENT_PRICE,
    PRICE_TO_FCF,
    PRICE_TO_BOOK,
    ROE,
    ROA,
    ASSETS_TO_EQUITY,
    PRICE_TO_EARNINGS,
];
