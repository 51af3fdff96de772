//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Health status as JSON

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Reports that the service is up.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
