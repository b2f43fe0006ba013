//! Market data feed
//!
//! External collaborator supplying spot prices and OHLC history. The
//! settlement core never calls this itself; quotes arrive as parameters
//! on the order.

mod coingecko;

pub use coingecko::CoinGeckoFeed;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// One OHLC candle
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    pub time: chrono::DateTime<chrono::Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Market data feed trait
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Current spot price per symbol. Symbols with no quote are absent
    /// from the map; callers must refuse to trade without one.
    async fn spot_prices(&self, symbols: &[&str]) -> Result<HashMap<String, f64>>;

    /// OHLC candles for a symbol over the trailing `days` days
    async fn ohlc_history(&self, symbol: &str, days: u32) -> Result<Vec<Candle>>;
}
