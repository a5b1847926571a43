// handlers/auth/whoami.rs - GET /api/auth/whoami handler

use axum::Extension;
use serde::Serialize;

use crate::access::{Role, ScopeRequest};
use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};

#[derive(Debug, Serialize)]
pub struct Whoami {
    pub user: UserProfile,
    pub role: Role,
    /// Dashboard the caller lands on; absent for roles without admin access
    pub home_scope: Option<ScopeRequest>,
    pub home_path: Option<String>,
}

/// GET /api/auth/whoami - profile of the authenticated caller and its landing dashboard
pub async fn whoami_get(Extension(current): Extension<CurrentCaller>) -> ApiResult<Whoami> {
    let home_scope = current.caller.home_scope();

    Ok(ApiResponse::success(Whoami {
        role: current.caller.role(),
        home_path: home_scope.map(dashboard_path),
        home_scope,
        user: current.profile,
    }))
}

/// Route of the dashboard that renders `scope`
pub fn dashboard_path(scope: ScopeRequest) -> String {
    match scope.id() {
        Some(id) => format!("/api/dashboard/{}/{}", scope.dimension(), id),
        None => format!("/api/dashboard/{}", scope.dimension()),
    }
}
