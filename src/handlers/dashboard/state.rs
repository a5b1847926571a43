// handlers/dashboard/state.rs - GET /api/dashboard/state handler

use axum::Extension;
use chrono::Utc;
use serde::Serialize;

use super::{recent, with_sla};
use crate::access::ScopeRequest;
use crate::analytics::{CategoryBreakdown, StatusTally};
use crate::database::models::{CityAnalytics, IssueView, MapPoint, StateAnalytics};
use crate::database::Repository;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::authorize;

#[derive(Debug, Serialize)]
pub struct StateDashboard {
    pub overview: StateAnalytics,
    pub cities: Vec<CityAnalytics>,
    pub recent_issues: Vec<IssueView>,
    pub map_points: Vec<MapPoint>,
    pub status_tally: StatusTally,
    pub category_breakdown: CategoryBreakdown,
}

/// GET /api/dashboard/state - statewide overview, state admins only
pub async fn state_get(
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<StateDashboard> {
    let filter = authorize(&current.caller, ScopeRequest::State, &repo).await?;

    let (overview, cities, issues, map_points, facets) = tokio::try_join!(
        repo.state_analytics(),
        repo.city_analytics(None),
        repo.issues(&filter, recent()),
        repo.map_points(&filter),
        repo.facets(&filter),
    )?;

    Ok(ApiResponse::success(StateDashboard {
        // The overview view is empty until its first refresh
        overview: overview.unwrap_or_default(),
        cities,
        recent_issues: with_sla(issues, Utc::now()),
        map_points,
        status_tally: StatusTally::from_facets(&facets),
        category_breakdown: CategoryBreakdown::from_facets(&facets),
    }))
}
