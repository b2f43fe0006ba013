//! Asset ledger: per-user, per-symbol holding quantities

use crate::db::models::Holding;
use crate::error::{AppError, Result};
use rusqlite::Connection;

/// Get all non-zero holdings for a user, unordered.
pub fn get_holdings(conn: &Connection, owner: i64) -> Result<Vec<Holding>> {
    let mut stmt = conn.prepare(
        "SELECT crypto_name, amount FROM assets WHERE user_id = ? AND amount != 0",
    )?;

    let holdings = stmt
        .query_map([owner], |row| {
            Ok(Holding {
                symbol: row.get(0)?,
                quantity: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(holdings)
}

/// Current quantity for (owner, symbol); zero if no row exists yet.
pub fn quantity(conn: &Connection, owner: i64, symbol: &str) -> Result<f64> {
    let result = conn.query_row(
        "SELECT amount FROM assets WHERE user_id = ? AND crypto_name = ?",
        rusqlite::params![owner, symbol],
        |row| row.get::<_, f64>(0),
    );

    match result {
        Ok(amount) => Ok(amount),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0.0),
        Err(e) => Err(e.into()),
    }
}

/// Apply `delta` to the (owner, symbol) holding, creating the row at zero
/// first if absent. The negative-balance check happens before any write.
pub fn adjust(conn: &Connection, owner: i64, symbol: &str, delta: f64) -> Result<f64> {
    let current = quantity(conn, owner, symbol)?;
    let updated = current + delta;

    if updated < 0.0 {
        return Err(AppError::InsufficientHoldings {
            symbol: symbol.to_string(),
            needed: -delta,
            available: current,
        });
    }

    conn.execute(
        "INSERT INTO assets (user_id, crypto_name, amount) VALUES (?, ?, ?)
         ON CONFLICT(user_id, crypto_name)
         DO UPDATE SET amount = amount + excluded.amount, updated_at = datetime('now')",
        rusqlite::params![owner, symbol, delta],
    )?;

    Ok(updated)
}
