//! Checkout Config

use std::time::Duration;

use clap::Args;

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Deadline in seconds for a single checkout call
    #[arg(long, env = "CONTEXT_TIMEOUT", default_value_t = 10)]
    pub context_timeout: u64,
}

impl CheckoutConfig {
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.context_timeout)
    }
}
