//! Security module for credential hashing

mod hashing;

pub use hashing::HashingManager;
