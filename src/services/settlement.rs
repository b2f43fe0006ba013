//! Trade settlement service
//!
//! The central state transition: validate an order against the session,
//! the supported-symbol set, and the owner's funds or holdings, then apply
//! the ledger adjustment, balance change, and log append as one atomic unit.

use crate::db::models::{is_supported_symbol, SettlementResult, TradeSide};
use crate::error::{AppError, Result};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A trade order as submitted by the UI layer, quote already fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOrder {
    pub owner: i64,
    pub symbol: String,
    pub side: TradeSide,
    pub quoted_price: f64,
    pub quantity: f64,
}

/// Settlement service for business logic
pub struct SettlementService;

impl SettlementService {
    /// Settle a trade.
    ///
    /// Precondition failures are reported in a fixed order: order validity,
    /// session authorization, symbol support, then funds (buy) or holdings
    /// (sell). The funds/holdings check and the three-part effect run inside
    /// one storage transaction under a per-owner lock, so a rapid
    /// double-submission can never double-spend.
    pub fn settle_trade(state: &AppState, order: &TradeOrder) -> Result<SettlementResult> {
        info!(
            "Settling {} {} {} @ {} for account {}",
            order.side.as_str(),
            order.quantity,
            order.symbol,
            order.quoted_price,
            order.owner
        );

        if !(order.quoted_price > 0.0) || !(order.quantity > 0.0) {
            return Err(AppError::InvalidOrder(format!(
                "price and quantity must be positive (price {}, quantity {})",
                order.quoted_price, order.quantity
            )));
        }

        match state.current_identity() {
            Some(id) if id == order.owner => {}
            Some(_) => {
                return Err(AppError::Unauthorized(format!(
                    "account {} is not the current session",
                    order.owner
                )))
            }
            None => return Err(AppError::Unauthorized("no active session".to_string())),
        }

        if !is_supported_symbol(&order.symbol) {
            return Err(AppError::UnsupportedSymbol(order.symbol.clone()));
        }

        let lock = state.settlement_lock(order.owner);
        let _guard = lock.lock();

        let result = state.db.settle_trade(
            order.owner,
            &order.symbol,
            order.side,
            order.quoted_price,
            order.quantity,
        );

        match &result {
            Ok(settled) => info!(
                "Settled trade {}: {} {} now {}, balance {}",
                settled.transaction_id,
                settled.symbol,
                settled.side.as_str(),
                settled.holding,
                settled.balance
            ),
            Err(e) => warn!("Settlement rejected for account {}: {}", order.owner, e),
        }

        result
    }
}
