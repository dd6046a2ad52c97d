//! Password hashing and checking, including recognition of legacy plaintext
//! rows that predate hashing.

use anyhow::Context as _;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;

use crate::error::MarketError;

/// Outcome of checking a presented password against a stored credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Matched a hashed credential.
    Match,
    /// Matched a legacy plaintext credential. The caller should rehash.
    LegacyMatch,
    Mismatch,
}

pub fn hash_password(password: &str) -> Result<String, MarketError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e))
        .context("hash password")?;
    Ok(hash.to_string())
}

/// Stored values that do not parse as a PHC string are treated as legacy
/// plaintext and compared in constant time.
pub fn check_password(stored: &str, presented: &str) -> CredentialCheck {
    match PasswordHash::new(stored) {
        Ok(parsed) => {
            if Argon2::default()
                .verify_password(presented.as_bytes(), &parsed)
                .is_ok()
            {
                CredentialCheck::Match
            } else {
                CredentialCheck::Mismatch
            }
        }
        Err(_) => {
            if stored.as_bytes().ct_eq(presented.as_bytes()).into() {
                CredentialCheck::LegacyMatch
            } else {
                CredentialCheck::Mismatch
            }
        }
    }
}
