//! Auth Config

use std::fmt;

use clap::Args;
use jiff::SignedDuration;

/// Bearer token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Bearer token lifetime in minutes
    #[arg(long, env = "JWT_LIFETIME_MINUTES", default_value_t = 60)]
    pub jwt_lifetime_minutes: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn token_lifetime(&self) -> SignedDuration {
        SignedDuration::from_mins(self.jwt_lifetime_minutes)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"**redacted**")
            .field("jwt_lifetime_minutes", &self.jwt_lifetime_minutes)
            .finish()
    }
}
