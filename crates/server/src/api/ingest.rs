//! Ingestion and generation API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use socdesk_core::{ingest_records, IngestSummary, JiraSearchResponse, TicketRecord};

use super::error::{api_error, store_error, ApiError};
use crate::metrics::{STORE_CLEARS_TOTAL, TICKETS_ADDED_TOTAL, TICKETS_REJECTED_TOTAL};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct IngestParams {
    /// Clear the store before ingesting.
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateBody {
    /// Defaults to `generator.default_count`.
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub added: usize,
    pub keys: Vec<String>,
}

fn record_ingest(source: &str, summary: &IngestSummary) {
    TICKETS_ADDED_TOTAL
        .with_label_values(&[source])
        .inc_by(summary.added.len() as u64);
    for rejected in &summary.rejected {
        TICKETS_REJECTED_TOTAL
            .with_label_values(&[rejected.kind.as_str()])
            .inc();
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/ingest/jira
///
/// Map an issue search response into tickets and add them to the store.
///
/// With `replace=true` the store is cleared first. Clear and add are separate
/// store calls, so a concurrent reader may see an empty or partly loaded
/// store in between.
pub async fn ingest_jira(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IngestParams>,
    Json(response): Json<JiraSearchResponse>,
) -> Result<Json<IngestSummary>, ApiError> {
    if params.replace {
        let removed = state.store().clear().map_err(store_error)?;
        STORE_CLEARS_TOTAL.inc();
        info!(removed, "Cleared store before ingest");
    }

    let records = response.issues.into_iter().map(TicketRecord::from);
    let summary = ingest_records(state.store(), records).map_err(store_error)?;
    record_ingest("jira", &summary);

    Ok(Json(summary))
}

/// POST /api/v1/generate
///
/// Generate synthetic SOC event tickets and add them to the store.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Option<Json<GenerateBody>>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    let limits = &state.config().generator;
    let count = body
        .and_then(|Json(b)| b.count)
        .unwrap_or(limits.default_count);

    if count == 0 || count > limits.max_count {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("count must be between 1 and {}", limits.max_count),
        ));
    }

    let tickets = state.generate_tickets(count);
    let summary = ingest_records(state.store(), tickets).map_err(store_error)?;
    record_ingest("generator", &summary);
    info!(
        added = summary.added.len(),
        rejected = summary.rejected.len(),
        "Generated tickets"
    );

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            added: summary.added.len(),
            keys: summary.added,
        }),
    ))
}
