//! Ticket API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use socdesk_core::{TicketError, TicketFilter, TicketRecord};

use super::error::{api_error, store_error, ApiError};
use crate::metrics::{STORE_CLEARS_TOTAL, TICKETS_ADDED_TOTAL, TICKETS_REJECTED_TOTAL};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    /// Filter by exact status
    pub status: Option<String>,
}

impl ListTicketsParams {
    pub fn filter(&self) -> TicketFilter {
        match &self.status {
            Some(status) => TicketFilter::new().with_status(status),
            None => TicketFilter::new(),
        }
    }
}

/// Response for clearing the store
#[derive(Debug, Serialize)]
pub struct ClearTicketsResponse {
    pub message: String,
    pub removed: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Add a ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(record): Json<TicketRecord>,
) -> Result<(StatusCode, Json<TicketRecord>), ApiError> {
    match state.store().add(record.clone()) {
        Ok(()) => {
            TICKETS_ADDED_TOTAL.with_label_values(&["api"]).inc();
            info!(key = %record.key, "Ticket added");
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            match e {
                TicketError::DuplicateKey(_) => {
                    TICKETS_REJECTED_TOTAL.with_label_values(&["duplicate"]).inc()
                }
                TicketError::InvalidRecord(_) => {
                    TICKETS_REJECTED_TOTAL.with_label_values(&["invalid"]).inc()
                }
                TicketError::Database(_) => {}
            }
            Err(store_error(e))
        }
    }
}

/// Get a ticket by key
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<TicketRecord>, ApiError> {
    match state.store().get(&key) {
        Ok(Some(ticket)) => Ok(Json(ticket)),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Ticket not found: {}", key),
        )),
        Err(e) => Err(store_error(e)),
    }
}

/// List tickets in insertion order, optionally filtered by status
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTicketsParams>,
) -> Result<Json<Vec<TicketRecord>>, ApiError> {
    state
        .store()
        .list(&params.filter())
        .map(Json)
        .map_err(store_error)
}

/// Remove every ticket (DELETE endpoint)
pub async fn clear_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearTicketsResponse>, ApiError> {
    let removed = state.store().clear().map_err(store_error)?;
    STORE_CLEARS_TOTAL.inc();
    info!(removed, "Ticket store cleared");

    Ok(Json(ClearTicketsResponse {
        message: "All tickets cleared".to_string(),
        removed,
    }))
}
