//! Application state management

use crate::db::Database;
use crate::error::Result;
use crate::security::HashingManager;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// User session information
#[derive(Debug, Clone)]
pub struct UserSession {
    pub account_id: i64,
    pub email: String,
    pub authenticated_at: chrono::DateTime<chrono::Utc>,
}

/// Application state shared across one running client instance
pub struct AppState {
    /// SQLite database connection
    pub db: Arc<Database>,

    /// Credential hashing
    pub hashing: HashingManager,

    /// Current user session; cleared on logout, never persisted
    session: RwLock<Option<UserSession>>,

    /// Per-owner settlement locks; concurrent settlements for the same
    /// owner serialize, different owners proceed independently
    settlement_locks: DashMap<i64, Arc<Mutex<()>>>,

    /// Application data directory
    pub data_dir: PathBuf,
}

impl AppState {
    /// Create new application state backed by a database file under `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        tracing::info!("Data directory: {:?}", data_dir);

        let db_path = data_dir.join("cryptosim.db");
        let db = Arc::new(Database::new(&db_path)?);

        Ok(Self {
            db,
            hashing: HashingManager::new(),
            session: RwLock::new(None),
            settlement_locks: DashMap::new(),
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Create state backed by an in-memory database
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            db: Arc::new(Database::in_memory()?),
            hashing: HashingManager::new(),
            session: RwLock::new(None),
            settlement_locks: DashMap::new(),
            data_dir: PathBuf::new(),
        })
    }

    /// Check if a user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Account id of the current session, if any
    pub fn current_identity(&self) -> Option<i64> {
        self.session.read().as_ref().map(|s| s.account_id)
    }

    /// Get current user session
    pub fn get_session(&self) -> Option<UserSession> {
        self.session.read().clone()
    }

    /// Set the current session, replacing any prior one
    pub fn set_session(&self, session: UserSession) {
        *self.session.write() = Some(session);
    }

    /// Clear the current session
    pub fn clear_session(&self) {
        *self.session.write() = None;
    }

    /// Lock guarding settlement for one owner
    pub fn settlement_lock(&self, owner: i64) -> Arc<Mutex<()>> {
        self.settlement_locks
            .entry(owner)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
