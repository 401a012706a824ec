//! Request-logging knobs fixed at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy)]
pub(super) struct RequestSettings {
    /// Requests slower than this are logged at warn.
    pub(super) slow_request: Duration,

    /// Attach incoming `traceparent` headers to request spans.
    pub(super) propagate_parent: bool,
}

const DEFAULTS: RequestSettings = RequestSettings {
    slow_request: Duration::from_secs(1),
    propagate_parent: false,
};

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// First call wins; later calls are ignored.
pub(super) fn install(config: &ServerConfig) {
    let observability = &config.observability;

    let _already_installed = SETTINGS.set(RequestSettings {
        slow_request: Duration::from_millis(config.logging.slow_request_threshold_ms),
        propagate_parent: observability.otel_enabled
            && observability.otel_parent_propagation_enabled,
    });
}

pub(super) fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or(DEFAULTS)
}
