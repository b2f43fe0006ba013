//! SQLite database module

pub mod models;
mod account;
mod ledger;
mod migrations;
mod trades;

use crate::error::{AppError, Result};
use crate::security::HashingManager;
use models::{Account, Holding, SettlementResult, Trade, TradeSide};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// SQLite database wrapper
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at `path`
    pub fn new(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (used by tests and throwaway sessions)
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // WAL mode for better concurrent access. The bundled SQLite is
        // compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1, so pin the
        // documented per-connection default (enforcement off) explicitly.
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=OFF;",
        )?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.run_migrations()?;

        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    // ========== Account Methods ==========

    /// Register a new account
    pub fn register_account(
        &self,
        email: &str,
        credential: &str,
        hashing: &HashingManager,
    ) -> Result<Account> {
        let conn = self.conn.lock();
        account::register(&conn, email, credential, hashing)
    }

    /// Verify credentials and return the matching account
    pub fn authenticate_account(
        &self,
        email: &str,
        credential: &str,
        hashing: &HashingManager,
    ) -> Result<Account> {
        let conn = self.conn.lock();
        account::authenticate(&conn, email, credential, hashing)
    }

    /// Number of registered accounts
    pub fn account_count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        account::count(&conn)
    }

    // ========== Ledger Methods ==========

    /// All non-zero holdings for a user
    pub fn get_holdings(&self, owner: i64) -> Result<Vec<Holding>> {
        let conn = self.conn.lock();
        ledger::get_holdings(&conn, owner)
    }

    /// Current holding quantity for (owner, symbol)
    pub fn holding_quantity(&self, owner: i64, symbol: &str) -> Result<f64> {
        let conn = self.conn.lock();
        ledger::quantity(&conn, owner, symbol)
    }

    // ========== Trade Log Methods ==========

    /// Most recent trade for a user
    pub fn last_trade(&self, owner: i64) -> Result<Option<Trade>> {
        let conn = self.conn.lock();
        trades::get_last(&conn, owner)
    }

    /// Full trade history for a user
    pub fn trade_history(&self, owner: i64) -> Result<Vec<Trade>> {
        let conn = self.conn.lock();
        trades::get_all(&conn, owner)
    }

    /// Cash balance derived from the trade log
    pub fn cash_balance(&self, owner: i64) -> Result<f64> {
        let conn = self.conn.lock();
        trades::cash_balance(&conn, owner)
    }

    // ========== Settlement ==========

    /// Apply a validated trade to the ledger and the trade log as one
    /// transaction. The funds/holdings check runs against the same snapshot
    /// the write commits on; a failure at any point rolls everything back.
    pub fn settle_trade(
        &self,
        owner: i64,
        symbol: &str,
        side: TradeSide,
        price: f64,
        quantity: f64,
    ) -> Result<SettlementResult> {
        if quantity <= 0.0 {
            return Err(AppError::InvalidQuantity(quantity));
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let notional = price * quantity;

        let (delta, balance_after) = match side {
            TradeSide::Buy => {
                let balance = trades::cash_balance(&tx, owner)?;
                if balance < notional {
                    return Err(AppError::InsufficientFunds {
                        needed: notional,
                        available: balance,
                    });
                }
                (quantity, balance - notional)
            }
            TradeSide::Sell => {
                let held = ledger::quantity(&tx, owner, symbol)?;
                if held < quantity {
                    return Err(AppError::InsufficientHoldings {
                        symbol: symbol.to_string(),
                        needed: quantity,
                        available: held,
                    });
                }
                let balance = trades::cash_balance(&tx, owner)?;
                (-quantity, balance + notional)
            }
        };

        let holding = ledger::adjust(&tx, owner, symbol, delta)?;
        let transaction_id = trades::record(&tx, owner, symbol, quantity, price, side)?;

        tx.commit()?;

        Ok(SettlementResult {
            transaction_id,
            symbol: symbol.to_string(),
            side,
            quantity,
            price,
            holding,
            balance: balance_after,
        })
    }
}
