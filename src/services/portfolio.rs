//! Portfolio service
//!
//! Read side of the ledger: holdings, the derived cash balance, and the
//! trade history the UI renders after each settlement.

use crate::db::models::{Holding, Trade};
use crate::error::{AppError, Result};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Snapshot of one account's portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub balance: f64,
    pub holdings: Vec<Holding>,
    pub last_trade: Option<Trade>,
}

/// Portfolio service for business logic
pub struct PortfolioService;

impl PortfolioService {
    /// Portfolio snapshot for the current session's account
    pub fn snapshot(state: &AppState) -> Result<PortfolioSnapshot> {
        let owner = Self::current_owner(state)?;
        info!("Portfolio snapshot for account {}", owner);

        Ok(PortfolioSnapshot {
            balance: state.db.cash_balance(owner)?,
            holdings: state.db.get_holdings(owner)?,
            last_trade: state.db.last_trade(owner)?,
        })
    }

    /// Full trade history for the current session's account
    pub fn history(state: &AppState) -> Result<Vec<Trade>> {
        let owner = Self::current_owner(state)?;
        state.db.trade_history(owner)
    }

    fn current_owner(state: &AppState) -> Result<i64> {
        state
            .current_identity()
            .ok_or_else(|| AppError::Unauthorized("no active session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{TradeSide, STARTING_BALANCE};
    use crate::services::auth::AuthService;
    use crate::services::settlement::{SettlementService, TradeOrder};

    #[test]
    fn test_snapshot_requires_session() {
        let state = AppState::in_memory().unwrap();
        let err = PortfolioService::snapshot(&state).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_fresh_account_snapshot() {
        let state = AppState::in_memory().unwrap();
        AuthService::register(&state, "alice@example.com", "pw").unwrap();
        AuthService::login(&state, "alice@example.com", "pw").unwrap();

        let snapshot = PortfolioService::snapshot(&state).unwrap();
        assert_eq!(snapshot.balance, STARTING_BALANCE);
        assert!(snapshot.holdings.is_empty());
        assert!(snapshot.last_trade.is_none());
    }

    #[test]
    fn test_snapshot_reflects_settlements() {
        let state = AppState::in_memory().unwrap();
        AuthService::register(&state, "alice@example.com", "pw").unwrap();
        let account = AuthService::login(&state, "alice@example.com", "pw").unwrap();

        SettlementService::settle_trade(
            &state,
            &TradeOrder {
                owner: account.id,
                symbol: "ripple".to_string(),
                side: TradeSide::Buy,
                quoted_price: 2.0,
                quantity: 100.0,
            },
        )
        .unwrap();

        let snapshot = PortfolioService::snapshot(&state).unwrap();
        assert_eq!(snapshot.balance, STARTING_BALANCE - 200.0);
        assert_eq!(snapshot.holdings.len(), 1);
        assert_eq!(snapshot.holdings[0].symbol, "ripple");
        assert_eq!(snapshot.holdings[0].quantity, 100.0);

        let last = snapshot.last_trade.unwrap();
        assert_eq!(last.symbol, "ripple");
        assert_eq!(last.notional(), 200.0);

        assert_eq!(PortfolioService::history(&state).unwrap().len(), 1);
    }
}
