//! Transaction log: append-only record of every executed trade

use crate::db::models::{Trade, TradeSide, STARTING_BALANCE};
use crate::error::{AppError, Result};
use rusqlite::Connection;

fn trade_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, i64, String, f64, f64, String, String)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn into_trade(
    (id, user_id, symbol, quantity, price, side, occurred_at): (i64, i64, String, f64, f64, String, String),
) -> Result<Trade> {
    Ok(Trade {
        id,
        user_id,
        symbol,
        quantity,
        price,
        side: TradeSide::from_str(&side)?,
        occurred_at,
    })
}

/// Append a trade record with the current timestamp. Rows are never
/// mutated or deleted afterwards.
pub fn record(
    conn: &Connection,
    owner: i64,
    symbol: &str,
    quantity: f64,
    price: f64,
    side: TradeSide,
) -> Result<i64> {
    if quantity <= 0.0 {
        return Err(AppError::InvalidQuantity(quantity));
    }

    let occurred_at = chrono::Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO trades (user_id, crypto_name, amount, price, trade_type, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        rusqlite::params![owner, symbol, quantity, price, side.as_str(), occurred_at],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Most recent trade for a user, ties on timestamp broken by highest id.
pub fn get_last(conn: &Connection, owner: i64) -> Result<Option<Trade>> {
    let result = conn.query_row(
        "SELECT id, user_id, crypto_name, amount, price, trade_type, created_at
         FROM trades WHERE user_id = ?
         ORDER BY created_at DESC, id DESC LIMIT 1",
        [owner],
        trade_from_row,
    );

    match result {
        Ok(raw) => Ok(Some(into_trade(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Full trade history for a user.
pub fn get_all(conn: &Connection, owner: i64) -> Result<Vec<Trade>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, crypto_name, amount, price, trade_type, created_at
         FROM trades WHERE user_id = ? ORDER BY created_at, id",
    )?;

    let rows = stmt
        .query_map([owner], trade_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(into_trade).collect()
}

/// Cash balance derived from the trade log:
/// starting balance + sell notionals - buy notionals.
pub fn cash_balance(conn: &Connection, owner: i64) -> Result<f64> {
    let delta: f64 = conn.query_row(
        "SELECT COALESCE(SUM(CASE trade_type
                    WHEN 'sell' THEN amount * price
                    ELSE -amount * price
                END), 0)
         FROM trades WHERE user_id = ?",
        [owner],
        |row| row.get(0),
    )?;

    Ok(STARTING_BALANCE + delta)
}
