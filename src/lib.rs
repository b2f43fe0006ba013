//! Cryptosim - simulated crypto trading core
//!
//! Portfolio ledger and trade-settlement engine for a simulated
//! cryptocurrency trading client: accounts, per-user asset holdings, an
//! append-only trade log, a derived cash balance, and atomic settlement
//! of buy/sell orders against externally supplied quotes.

pub mod db;
pub mod error;
pub mod market;
pub mod security;
pub mod services;
pub mod state;

pub use db::models::{
    Account, Holding, SettlementResult, Trade, TradeSide, STARTING_BALANCE, SUPPORTED_SYMBOLS,
};
pub use error::{AppError, Result};
pub use services::{AuthService, PortfolioService, SettlementService, TradeOrder};
pub use state::{AppState, UserSession};
