//! Auth Config

use clap::Args;

/// Token signing and seed account settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in hours
    #[arg(
        long,
        env = "JWT_TTL_HOURS",
        default_value_t = 24_i64,
        value_parser = clap::value_parser!(i64).range(1..=8760)
    )]
    pub jwt_ttl_hours: i64,

    /// Username of the seeded administrator
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Password of the seeded administrator; no admin is seeded when unset
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Display name of the seeded administrator
    #[arg(long, env = "ADMIN_NAME", default_value = "Administrator")]
    pub admin_name: String,

    /// Username of the seeded designer
    #[arg(long, env = "DESIGNER_USERNAME", default_value = "designer")]
    pub designer_username: String,

    /// Password of the seeded designer; no designer is seeded when unset
    #[arg(long, env = "DESIGNER_PASSWORD", hide_env_values = true)]
    pub designer_password: Option<String>,

    /// Display name of the seeded designer
    #[arg(long, env = "DESIGNER_NAME", default_value = "Designer")]
    pub designer_name: String,
}
