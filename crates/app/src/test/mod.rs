//! Shared fixtures for service tests.

pub(crate) mod context;
pub(crate) mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;

/// Signing secret used by every test context.
pub(crate) const TEST_JWT_SECRET: &str = "warunk-test-signing-secret";
