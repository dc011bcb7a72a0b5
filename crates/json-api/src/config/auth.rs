//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value = "86400")]
    pub token_ttl_seconds: i64,
}
