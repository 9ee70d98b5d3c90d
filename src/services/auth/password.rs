use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("salt generation failed")]
    Salt,
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hash a password with Argon2id and a fresh random salt (PHC string format).
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes).map_err(|_| PasswordError::Salt)?;
    let salt = SaltString::encode_b64(&bytes).map_err(PasswordError::Hash)?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError::Hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// Stand-in for members without a usable hash, so every login pays for one Argon2 run.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("seed-api-dummy-password").ok());

/// Spend the same work as `verify_password` without a stored hash. Always `false`.
pub fn verify_dummy(password: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dummy_verification_runs_argon2_and_never_matches() {
        assert!(DUMMY_HASH.as_deref().unwrap().starts_with("$argon2id$"));
        assert!(!verify_dummy("seed-api-dummy-password"));
        assert!(!verify_dummy(""));
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }
}
