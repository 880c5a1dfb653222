//! Password hashing and verification.

use argon2::Config;
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

const SALT_BYTES: usize = 16;

#[derive(Debug, Error)]
#[error("argon2 failure")]
pub struct PasswordError(#[from] argon2::Error);

/// Hash a password into an encoded Argon2 string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0_u8; SALT_BYTES];

    OsRng.fill_bytes(&mut salt);

    Ok(argon2::hash_encoded(
        password.as_bytes(),
        &salt,
        &Config::default(),
    )?)
}

/// Check a password against an encoded Argon2 hash.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, PasswordError> {
    Ok(argon2::verify_encoded(hash, password.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() -> TestResult {
        let hash = hash_password("rahasia123")?;

        assert!(verify_password(&hash, "rahasia123")?);
        assert!(!verify_password(&hash, "rahasia124")?);

        Ok(())
    }

    #[test]
    fn hashing_twice_uses_different_salts() -> TestResult {
        let first = hash_password("rahasia123")?;
        let second = hash_password("rahasia123")?;

        assert_ne!(first, second, "salts should differ between hashes");

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("not-a-hash", "rahasia123").is_err());
    }
}
