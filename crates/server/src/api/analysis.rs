//! Analysis API handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use socdesk_core::{compute_insights, AnalysisReport, TicketFilter, TicketInsights, TicketRecord};

use super::error::{store_error, ApiError};
use super::tickets::ListTicketsParams;
use crate::state::AppState;

/// Request body for analysing a caller-supplied collection
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
}

/// GET /api/v1/analysis
///
/// Run every agent over a snapshot of the store.
pub async fn analyze_stored(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTicketsParams>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let snapshot = state.store().list(&params.filter()).map_err(store_error)?;
    debug!(tickets = snapshot.len(), "Analysing stored tickets");
    Ok(Json(state.analyze(snapshot).await))
}

/// POST /api/v1/analysis
///
/// Run every agent over the posted tickets without storing them.
pub async fn analyze_posted(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> Json<AnalysisReport> {
    debug!(tickets = body.tickets.len(), "Analysing posted tickets");
    Json(state.analyze(body.tickets).await)
}

/// GET /api/v1/insights
///
/// Distributions and workload recommendations over the store.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TicketInsights>, ApiError> {
    let snapshot = state
        .store()
        .list(&TicketFilter::new())
        .map_err(store_error)?;
    Ok(Json(compute_insights(&snapshot, &state.config().analysis)))
}
