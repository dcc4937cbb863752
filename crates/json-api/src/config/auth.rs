//! Auth Config

use clap::Args;

/// Admin authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Bearer token required by admin routes; admin routes reject every request when unset
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,
}
