// handlers/workers.rs - GET /api/workers handler

use axum::Extension;
use serde::Serialize;
use serde_json::Value;

use crate::access::ScopeFilter;
use crate::analytics::WorkerSummary;
use crate::database::models::Contractor;
use crate::database::Repository;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::contractor_scope;

#[derive(Debug, Serialize)]
pub struct WorkerListing {
    pub workers: Vec<Contractor>,
    pub summary: WorkerSummary,
    /// Statewide contractor performance, only for unrestricted callers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<Vec<Value>>,
}

/// GET /api/workers - contractors in the caller's city with summary figures
pub async fn workers_get(
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<WorkerListing> {
    let scope = contractor_scope(&current.caller, &repo).await?;

    let city_id = match scope {
        ScopeFilter::City(id) => Some(id),
        _ => None,
    };
    let workers = repo.contractors(city_id).await?;

    let performance = match scope {
        ScopeFilter::All => Some(repo.contractor_performance().await?),
        _ => None,
    };

    Ok(ApiResponse::success(WorkerListing {
        summary: WorkerSummary::from_contractors(&workers),
        workers,
        performance,
    }))
}
