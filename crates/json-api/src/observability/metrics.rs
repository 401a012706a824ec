//! Prometheus metrics for the HTTP layer and the order workflow.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    orders_created_total: IntCounterVec,
    order_status_changes_total: IntCounterVec,
    upload_bytes_total: IntCounter,
}

impl Metrics {
    fn try_new() -> prometheus::Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new(
                "sowraashi_http_requests_total",
                "HTTP requests by method, route and status.",
            ),
            &["method", "route", "status_class", "status_code"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "sowraashi_http_request_duration_seconds",
                "HTTP request latency by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?;

        let requests_in_flight = IntGauge::new(
            "sowraashi_http_requests_in_flight",
            "HTTP requests currently being served.",
        )?;

        let orders_created_total = IntCounterVec::new(
            Opts::new(
                "sowraashi_orders_created_total",
                "Orders placed, by channel.",
            ),
            &["channel"],
        )?;

        let order_status_changes_total = IntCounterVec::new(
            Opts::new(
                "sowraashi_order_status_changes_total",
                "Order lifecycle transitions, by target status.",
            ),
            &["status"],
        )?;

        let upload_bytes_total = IntCounter::new(
            "sowraashi_upload_bytes_total",
            "Bytes written to the upload directory.",
        )?;

        let registry = Registry::new();

        let collectors: [Box<dyn Collector>; 6] = [
            Box::new(requests_total.clone()),
            Box::new(request_duration_seconds.clone()),
            Box::new(requests_in_flight.clone()),
            Box::new(orders_created_total.clone()),
            Box::new(order_status_changes_total.clone()),
            Box::new(upload_bytes_total.clone()),
        ];

        for collector in collectors {
            registry.register(collector)?;
        }

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            orders_created_total,
            order_status_changes_total,
            upload_bytes_total,
        })
    }
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            Metrics::try_new()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

/// Holds the in-flight gauge up for the lifetime of a request.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static Metrics>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.requests_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code), code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a newly placed order. `channel` is `custom` or `designer`.
pub(crate) fn record_order_created(channel: &str) {
    if let Some(metrics) = metrics() {
        metrics.orders_created_total.with_label_values(&[channel]).inc();
    }
}

pub(crate) fn record_status_change(status: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .order_status_changes_total
            .with_label_values(&[status])
            .inc();
    }
}

pub(crate) fn record_upload(bytes: u64) {
    if let Some(metrics) = metrics() {
        metrics.upload_bytes_total.inc_by(bytes);
    }
}

/// Prometheus text exposition.
#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    let encoder = TextEncoder::new();
    let mut body = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    if let Ok(content_type) = HeaderValue::from_str(encoder.format_type()) {
        res.headers_mut().insert(CONTENT_TYPE, content_type);
    }

    res.render(String::from_utf8_lossy(&body).into_owned());
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}
