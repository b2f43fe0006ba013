//! Business-logic services
//!
//! Services hold no state of their own; everything flows through
//! [`crate::state::AppState`].

pub mod auth;
pub mod portfolio;
pub mod settlement;

pub use auth::AuthService;
pub use portfolio::PortfolioService;
pub use settlement::{SettlementService, TradeOrder};
