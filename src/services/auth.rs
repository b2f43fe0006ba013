//! Authentication service
//!
//! Registration and login over the account store, plus the in-memory
//! session lifecycle.

use crate::db::models::Account;
use crate::error::Result;
use crate::state::{AppState, UserSession};
use tracing::info;

/// Authentication service for business logic
pub struct AuthService;

impl AuthService {
    /// Register a new account. Does not log the user in.
    pub fn register(state: &AppState, email: &str, credential: &str) -> Result<Account> {
        info!("Signup attempt for {}", email);

        let account = state.db.register_account(email, credential, &state.hashing)?;

        info!("Account {} registered", account.id);
        Ok(account)
    }

    /// Verify credentials and open a session, replacing any prior one.
    pub fn login(state: &AppState, email: &str, credential: &str) -> Result<Account> {
        info!("Login attempt for {}", email);

        let account = state
            .db
            .authenticate_account(email, credential, &state.hashing)?;

        state.set_session(UserSession {
            account_id: account.id,
            email: account.email.clone(),
            authenticated_at: chrono::Utc::now(),
        });

        info!("Account {} logged in", account.id);
        Ok(account)
    }

    /// Clear the current session.
    pub fn logout(state: &AppState) {
        if let Some(session) = state.get_session() {
            info!("Account {} logged out", session.account_id);
        }
        state.clear_session();
    }
}
