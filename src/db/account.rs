//! Account management

use crate::db::models::Account;
use crate::error::{AppError, Result};
use crate::security::HashingManager;
use rusqlite::Connection;

/// Register a new account. Email matching is case-sensitive on the stored value.
pub fn register(
    conn: &Connection,
    email: &str,
    credential: &str,
    hashing: &HashingManager,
) -> Result<Account> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)",
        [email],
        |row| row.get(0),
    )?;

    if exists {
        return Err(AppError::DuplicateEmail(email.to_string()));
    }

    let password_hash = hashing.hash_password(credential)?;

    conn.execute(
        "INSERT INTO users (email, password_hash) VALUES (?, ?)",
        rusqlite::params![email, password_hash],
    )?;

    let id = conn.last_insert_rowid();

    Ok(Account {
        id,
        email: email.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Verify credentials and return the matching account.
pub fn authenticate(
    conn: &Connection,
    email: &str,
    credential: &str,
    hashing: &HashingManager,
) -> Result<Account> {
    let result = conn.query_row(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
        [email],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    );

    match result {
        Ok((id, email, password_hash, created_at)) => {
            if hashing.verify_password(credential, &password_hash)? {
                Ok(Account {
                    id,
                    email,
                    created_at,
                })
            } else {
                Err(AppError::InvalidCredential)
            }
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(AppError::NotFound(email.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Number of registered accounts
pub fn count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}
