//! Server configuration module

use clap::Parser;
use warunk_app::{auth::JwtSecret, context::AppSettings};

use crate::config::{
    auth::AuthConfig,
    checkout::CheckoutConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Warunk JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "warunk-json", about = "Warunk JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings the application services are built from.
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.max_connections,
            jwt_secret: JwtSecret::new(self.auth.jwt_secret.as_bytes()),
            token_lifetime: self.auth.token_lifetime(),
            checkout_deadline: self.checkout.deadline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "warunk-json",
            "--database-url",
            "postgresql://localhost/warunk",
            "--jwt-secret",
            "rahasia",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.jwt_lifetime_minutes, 60);
        assert_eq!(config.checkout.context_timeout, 10);

        Ok(())
    }

    #[test]
    fn secret_is_not_shown_in_debug_output() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "warunk-json",
            "--database-url",
            "postgresql://localhost/warunk",
            "--jwt-secret",
            "sangat-rahasia",
        ])?;

        assert!(
            !format!("{:?}", config.app_settings()).contains("sangat-rahasia"),
            "secret leaked into debug output"
        );

        Ok(())
    }
}
