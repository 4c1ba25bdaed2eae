//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the SOC desk server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Ticket intake metrics (added, rejected, store clears)
//! - Tickets by status (collected dynamically)
//!
//! Agent runner metrics live in `socdesk_core::metrics` and are registered here.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec,
    Opts, Registry, TextEncoder,
};
use regex_lite::Regex;
use tracing::warn;

use socdesk_core::{analysis::FrequencyTable, TicketFilter};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "socdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("socdesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "socdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets accepted into the store by source.
pub static TICKETS_ADDED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("socdesk_tickets_added_total", "Tickets accepted into the store"),
        &["source"], // "api", "jira", "generator"
    )
    .unwrap()
});

/// Tickets refused by the store by reason.
pub static TICKETS_REJECTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "socdesk_tickets_rejected_total",
            "Tickets refused by the store",
        ),
        &["reason"], // "duplicate", "invalid"
    )
    .unwrap()
});

/// Store clears.
pub static STORE_CLEARS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("socdesk_store_clears_total", "Times the ticket store was cleared").unwrap()
});

/// Tickets by current status (collected dynamically).
pub static TICKETS_BY_STATUS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("socdesk_tickets_by_status", "Current ticket count by status"),
        &["status"],
    )
    .unwrap()
});

/// Tickets currently stored (collected dynamically).
pub static TICKETS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("socdesk_tickets_stored", "Number of tickets in the store").unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Tickets
    registry
        .register(Box::new(TICKETS_ADDED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(TICKETS_REJECTED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(STORE_CLEARS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(TICKETS_BY_STATUS.clone()))
        .unwrap();
    registry.register(Box::new(TICKETS_STORED.clone())).unwrap();

    // Core metrics (agent runner)
    for metric in socdesk_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the status gauges reflect the store as it is now.
/// Statuses that no longer occur are dropped from the gauge.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let tickets = match state.store().list(&TicketFilter::new()) {
        Ok(tickets) => tickets,
        Err(e) => {
            warn!(error = %e, "Failed to collect ticket metrics");
            return;
        }
    };

    TICKETS_STORED.set(tickets.len() as i64);

    let statuses: FrequencyTable = tickets.iter().filter_map(|t| t.status.as_deref()).collect();
    TICKETS_BY_STATUS.reset();
    for (status, count) in statuses.sorted() {
        TICKETS_BY_STATUS
            .with_label_values(&[&status])
            .set(count as i64);
    }
}

static TICKET_KEY_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/[A-Z][A-Z0-9]*-\d+(/|$)").unwrap());

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels (replace ticket keys with placeholders).
pub fn normalize_path(path: &str) -> String {
    let result = TICKET_KEY_SEGMENT.replace_all(path, "/{key}$1");
    let result = NUMERIC_SEGMENT.replace_all(&result, "/{id}$1");
    result.to_string()
}
