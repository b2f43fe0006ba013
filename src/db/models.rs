//! Database models

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Cash every account starts with, in quote-currency units.
pub const STARTING_BALANCE: f64 = 100_000.0;

/// The fixed set of tradable symbols.
pub const SUPPORTED_SYMBOLS: &[&str] = &["bitcoin", "ethereum", "litecoin", "ripple"];

/// Returns true if `symbol` is tradable.
pub fn is_supported_symbol(symbol: &str) -> bool {
    SUPPORTED_SYMBOLS.contains(&symbol)
}

/// Account model (credential hash never leaves the db layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

/// One user's quantity of one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
}

/// Buy or sell side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            other => Err(AppError::Internal(format!("unknown trade side: {other}"))),
        }
    }
}

/// Executed trade record (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub side: TradeSide,
    pub occurred_at: String,
}

impl Trade {
    /// price x quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Outcome of a settled trade: the updated holding and cash balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResult {
    pub transaction_id: i64,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub holding: f64,
    pub balance: f64,
}
