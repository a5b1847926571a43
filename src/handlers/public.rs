// handlers/public.rs - Unauthenticated service endpoints

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;

/// GET / - service banner and route index
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Civic Dashboard API",
            "version": version,
            "description": "Role-scoped civic issue dashboards with SLA tracking and report export",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/auth/whoami (protected)",
                "dashboard": "/api/dashboard/state, /api/dashboard/{city,zone,ward}/:id (protected)",
                "issues": "/api/issues?scope&id&status, /api/issues/:id (protected)",
                "reports": "/api/reports/export?scope&id&format (protected)",
                "workers": "/api/workers (protected)",
            }
        }
    }))
}

/// GET /health - database liveness
pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database_error": e.to_string()
                    }
                })),
            )
        }
    }
}
