//! HTTP Config

use clap::Args;

/// CORS and rate limiting settings.
#[derive(Debug, Args)]
pub struct HttpConfig {
    /// Origins allowed to call the API (comma separated)
    #[arg(
        long,
        env = "CORS_ORIGIN",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://localhost:5173,http://localhost:5174"
    )]
    pub cors_origin: Vec<String>,

    /// Rate limit window in milliseconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_MS", default_value_t = 900_000_u64)]
    pub rate_limit_window_ms: u64,

    /// Requests allowed per client IP within one window
    #[arg(long, env = "RATE_LIMIT_MAX_REQUESTS", default_value_t = 100_usize)]
    pub rate_limit_max_requests: usize,
}

impl HttpConfig {
    /// Rate limit window in whole seconds, rounded up and never below one.
    pub fn rate_limit_window_secs(&self) -> i64 {
        let secs = self.rate_limit_window_ms.div_ceil(1000).max(1);

        i64::try_from(secs).unwrap_or(i64::MAX)
    }
}
