//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    http::HttpConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    uploads::UploadsConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod http;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod uploads;

/// Sowraashi JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "sowraashi-json", about = "Sowraashi JSON API Server", long_about = None)]
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

    /// Token signing and seed account settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Upload storage settings.
    #[command(flatten)]
    pub uploads: UploadsConfig,

    /// CORS and rate limiting settings.
    #[command(flatten)]
    pub http: HttpConfig,
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
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "sowraashi-json",
        "--database-url",
        "postgres://localhost/sowraashi",
        "--jwt-secret",
        "not-a-real-secret",
    ];

    #[test]
    fn defaults_match_documented_values() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:5001");
        assert_eq!(config.auth.jwt_ttl_hours, 24);
        assert_eq!(config.uploads.max_file_size, 5_242_880);
        assert_eq!(config.http.rate_limit_window_ms, 900_000);
        assert_eq!(config.http.rate_limit_max_requests, 100);
        assert!(!config.observability.otel_enabled, "otel should be opt-in");
        assert_eq!(config.database.pool_settings().max_connections, 10);

        Ok(())
    }

    #[test]
    fn cors_origins_are_comma_separated() -> TestResult {
        let mut args = REQUIRED.to_vec();

        args.extend([
            "--cors-origin",
            "http://localhost:5173,https://shop.example.com",
        ]);

        let config = ServerConfig::try_parse_from(args)?;

        assert_eq!(
            config.http.cors_origin,
            vec!["http://localhost:5173", "https://shop.example.com"]
        );

        Ok(())
    }

    #[test]
    fn empty_pool_is_rejected() {
        let mut args = REQUIRED.to_vec();

        args.extend(["--database-max-connections", "0"]);

        assert!(
            ServerConfig::try_parse_from(args).is_err(),
            "a pool needs at least one connection"
        );
    }

    #[test]
    fn missing_jwt_secret_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "sowraashi-json",
            "--database-url",
            "postgres://localhost/sowraashi",
        ]);

        assert!(result.is_err(), "jwt secret must be required");
    }
}
