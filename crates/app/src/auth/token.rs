//! Bearer token issuing and validation.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::models::{Role, UserUuid};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// HMAC signing secret, wiped from memory on drop.
#[derive(Clone)]
pub struct JwtSecret {
    bytes: Vec<u8>,
}

impl JwtSecret {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(**redacted**)")
    }
}

impl Drop for JwtSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime is out of range")]
    Lifetime(#[source] jiff::Error),

    #[error("jwt error")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Sign a token for `user` valid from `issued_at` for `lifetime`.
pub fn issue_token(
    secret: &JwtSecret,
    user: UserUuid,
    role: Role,
    issued_at: Timestamp,
    lifetime: SignedDuration,
) -> Result<(String, Timestamp), TokenError> {
    let expires_at = issued_at
        .checked_add(lifetime)
        .map_err(TokenError::Lifetime)?;

    let claims = Claims {
        sub: user.into_uuid(),
        role,
        iat: issued_at.as_second(),
        exp: expires_at.as_second(),
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expires_at))
}

/// Verify signature and expiry and return the claims.
pub fn decode_token(secret: &JwtSecret, token: &str) -> Result<Claims, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(ALGORITHM),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn secret() -> JwtSecret {
        JwtSecret::new("test-signing-secret")
    }

    #[test]
    fn issued_token_decodes_to_same_claims() -> TestResult {
        let user = UserUuid::new();
        let (token, expires_at) = issue_token(
            &secret(),
            user,
            Role::Admin,
            Timestamp::now(),
            SignedDuration::from_mins(60),
        )?;

        let claims = decode_token(&secret(), &token)?;

        assert_eq!(claims.sub, user.into_uuid());
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, expires_at.as_second());

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let issued_at = Timestamp::now().checked_sub(SignedDuration::from_hours(3))?;

        let (token, _) = issue_token(
            &secret(),
            UserUuid::new(),
            Role::User,
            issued_at,
            SignedDuration::from_mins(60),
        )?;

        assert!(decode_token(&secret(), &token).is_err());

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> TestResult {
        let (token, _) = issue_token(
            &JwtSecret::new("another-secret"),
            UserUuid::new(),
            Role::User,
            Timestamp::now(),
            SignedDuration::from_mins(5),
        )?;

        assert!(decode_token(&secret(), &token).is_err());

        Ok(())
    }

    #[test]
    fn secret_debug_is_redacted() {
        assert_eq!(format!("{:?}", secret()), "JwtSecret(**redacted**)");
    }
}
