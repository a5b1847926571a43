// handlers/dashboard/ward.rs - GET /api/dashboard/ward/:ward_id handler

use axum::{extract::Path, Extension};
use chrono::Utc;
use serde::Serialize;

use super::{queue, with_sla};
use crate::access::ScopeDimension;
use crate::database::models::{Contractor, IssueView, MapPoint, Ward, WardAnalytics};
use crate::database::Repository;
use crate::error::ApiError;
use crate::handlers::path_scope;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::authorize;
use crate::types::IssueStatus;

#[derive(Debug, Serialize)]
pub struct WardDashboard {
    pub ward: Ward,
    pub analytics: Option<WardAnalytics>,
    /// Issues forwarded by the CRC and not yet picked up
    pub forwarded_queue: Vec<IssueView>,
    pub in_progress: Vec<IssueView>,
    /// Workers available in the ward's city
    pub workers: Vec<Contractor>,
    pub map_points: Vec<MapPoint>,
}

/// GET /api/dashboard/ward/:ward_id - ward work queues and available workers
pub async fn ward_get(
    Path(ward_id): Path<String>,
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<WardDashboard> {
    let request = path_scope(ScopeDimension::Ward, &ward_id)?;
    let filter = authorize(&current.caller, request, &repo).await?;
    let Some(ward_id) = request.id() else {
        return Err(ApiError::bad_request("Ward id required"));
    };

    let ward = repo
        .ward(ward_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Ward not found"))?;

    let (analytics, forwarded, in_progress, workers, map_points) = tokio::try_join!(
        repo.ward_analytics(ward_id),
        repo.issues(&filter, queue(IssueStatus::ForwardedToWard)),
        repo.issues(&filter, queue(IssueStatus::InProgress)),
        repo.contractors(Some(ward.city_id)),
        repo.map_points(&filter),
    )?;

    let now = Utc::now();
    Ok(ApiResponse::success(WardDashboard {
        ward,
        analytics,
        forwarded_queue: with_sla(forwarded, now),
        in_progress: with_sla(in_progress, now),
        workers,
        map_points,
    }))
}
