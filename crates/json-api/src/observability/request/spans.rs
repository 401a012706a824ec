//! HTTP span helpers.

use uuid::Uuid;

/// Served files share one route label.
const UPLOADS_PREFIX: &str = "/uploads/";

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_label(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Collapse identifiers so metrics and span names stay low-cardinality.
fn route_label(path: &str) -> String {
    if path.starts_with(UPLOADS_PREFIX) {
        return "/uploads/{file}".to_owned();
    }

    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
