//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Session and `OpenBao` settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// `OpenBao` server address
    #[arg(long = "openbao-addr", env = "OPENBAO_ADDR")]
    pub addr: String,

    /// `OpenBao` authentication token
    #[arg(long = "openbao-token", env = "OPENBAO_TOKEN", hide_env_values = true)]
    pub token: String,

    /// `OpenBao` Transit key name
    #[arg(long = "openbao-transit-key", env = "OPENBAO_TRANSIT_KEY")]
    pub transit_key: String,

    /// Session lifetime in minutes
    #[arg(
        long,
        env = "SESSION_TTL_MINUTES",
        default_value_t = 60,
        value_parser = clap::value_parser!(i64).range(1..=525_600)
    )]
    pub session_ttl_minutes: i64,
}

impl AuthConfig {
    /// Session lifetime as a duration.
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_mins(self.session_ttl_minutes)
    }
}
