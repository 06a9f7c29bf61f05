//! Shared infrastructure for service tests.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;

/// E-mail address of the user every [`TestContext`] starts with.
pub(crate) const TEST_USER_EMAIL: &str = "shopper@example.com";
