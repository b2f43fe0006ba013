//! Argon2id credential hashing

use crate::error::{AppError, Result};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2, Params, Version,
};

/// Hashing manager using Argon2id with per-hash random salts
pub struct HashingManager;

impl HashingManager {
    pub fn new() -> Self {
        Self
    }

    /// Hash a credential with Argon2id
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            Version::V0x13,
            Params::new(
                19456,  // m_cost (19 MiB)
                2,      // t_cost (2 iterations)
                1,      // p_cost (1 thread)
                None,   // output length (default 32)
            )
            .map_err(|e| AppError::Internal(format!("Invalid Argon2 params: {}", e)))?,
        );

        let salt = SaltString::generate(&mut OsRng);

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a credential against a stored hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;

        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}

impl Default for HashingManager {
    fn default() -> Self {
        Self::new()
    }
}
