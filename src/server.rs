use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{auth, dashboard, issues, public, reports, workers};
use crate::middleware::{jwt_auth_middleware, load_caller_middleware};

/// Full application router
pub fn app() -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(api_routes())
        .layer(cors_layer());

    if config::config().api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn api_routes() -> Router {
    Router::new()
        .route("/api/auth/whoami", get(auth::whoami_get))
        .route("/api/dashboard/state", get(dashboard::state_get))
        .route("/api/dashboard/city/:city_id", get(dashboard::city_get))
        .route("/api/dashboard/zone/:zone_id", get(dashboard::zone_get))
        .route("/api/dashboard/ward/:ward_id", get(dashboard::ward_get))
        .route("/api/issues", get(issues::issues_get))
        .route("/api/issues/:id", get(issues::issue_get))
        .route("/api/reports/export", get(reports::export_get))
        .route("/api/workers", get(workers::workers_get))
        // Layers run bottom-up: token first, then the caller lookup
        .route_layer(middleware::from_fn(load_caller_middleware))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
