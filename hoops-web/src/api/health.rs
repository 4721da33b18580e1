//! Health Check API Handler
//!
//! Liveness endpoint for monitoring, with the failure tally kept by the
//! error reporter.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::report::ErrorReporter;

/// GET /health
/// Health check endpoint
pub async fn health_check(State(reporter): State<Arc<dyn ErrorReporter>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "failures": reporter.counts(),
    }))
}
