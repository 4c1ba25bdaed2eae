use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{analysis, handlers, ingest, middleware::metrics_middleware, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Tickets
        .route(
            "/tickets",
            get(tickets::list_tickets)
                .post(tickets::create_ticket)
                .delete(tickets::clear_tickets),
        )
        .route("/tickets/{key}", get(tickets::get_ticket))
        // Analysis
        .route(
            "/analysis",
            get(analysis::analyze_stored).post(analysis::analyze_posted),
        )
        .route("/insights", get(analysis::get_insights))
        // Intake
        .route("/ingest/jira", post(ingest::ingest_jira))
        .route("/generate", post(ingest::generate))
        .with_state(state.clone());

    Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
