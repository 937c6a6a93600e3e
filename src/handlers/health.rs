//! # Health Check Handler
//!
//! Simple endpoint to check if the server is running.

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// Always 200 while the process is up. It does not probe PocketBase.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pocketgate"
    }))
}
