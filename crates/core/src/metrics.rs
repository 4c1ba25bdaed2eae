//! Prometheus metrics for core components.
//!
//! This module provides metrics for the agent runner: runs, per-agent
//! failures and durations, and how many IPs each mitigation pass flags.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Analysis Metrics
// =============================================================================

/// Analysis runs total by execution mode.
pub static ANALYSIS_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("socdesk_analysis_runs_total", "Total analysis runs"),
        &["mode"], // "sequential", "concurrent"
    )
    .unwrap()
});

/// Agent failures total by agent.
pub static AGENT_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "socdesk_agent_failures_total",
            "Agent runs that produced an error instead of a result",
        ),
        &["agent"],
    )
    .unwrap()
});

/// Agent run duration in seconds.
pub static AGENT_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("socdesk_agent_duration_seconds", "Duration of one agent run")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["agent"],
    )
    .unwrap()
});

/// Snapshot size per analysis run.
pub static SNAPSHOT_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "socdesk_snapshot_tickets",
            "Number of tickets in each analysed snapshot",
        )
        .buckets(vec![0.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0]),
        &[],
    )
    .unwrap()
});

/// IPs flagged per mitigation run.
pub static FLAGGED_IPS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "socdesk_flagged_ips",
            "Number of repeated IPs flagged per analysis run",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0, 25.0]),
        &[],
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ANALYSIS_RUNS.clone()),
        Box::new(AGENT_FAILURES.clone()),
        Box::new(AGENT_DURATION.clone()),
        Box::new(SNAPSHOT_SIZE.clone()),
        Box::new(FLAGGED_IPS.clone()),
    ]
}
