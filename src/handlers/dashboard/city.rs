// handlers/dashboard/city.rs - GET /api/dashboard/city/:city_id handler

use axum::{extract::Path, Extension};
use chrono::Utc;
use serde::Serialize;

use super::{recent, with_sla};
use crate::access::ScopeDimension;
use crate::database::models::{City, CityAnalytics, IssueView, JurisdictionRef, MapPoint};
use crate::database::Repository;
use crate::error::ApiError;
use crate::handlers::path_scope;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::authorize;

#[derive(Debug, Serialize)]
pub struct CityDashboard {
    pub city: City,
    pub analytics: Option<CityAnalytics>,
    pub wards: Vec<JurisdictionRef>,
    pub zones: Vec<JurisdictionRef>,
    pub recent_issues: Vec<IssueView>,
    pub map_points: Vec<MapPoint>,
}

/// GET /api/dashboard/city/:city_id - one city with its wards and zones
pub async fn city_get(
    Path(city_id): Path<String>,
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<CityDashboard> {
    let request = path_scope(ScopeDimension::City, &city_id)?;
    let filter = authorize(&current.caller, request, &repo).await?;
    let Some(city_id) = request.id() else {
        return Err(ApiError::bad_request("City id required"));
    };

    let (city, analytics, wards, zones, issues, map_points) = tokio::try_join!(
        repo.city(city_id),
        repo.city_analytics(Some(city_id)),
        repo.wards_in_city(city_id),
        repo.zones_in_city(city_id),
        repo.issues(&filter, recent()),
        repo.map_points(&filter),
    )?;

    let city = city.ok_or_else(|| ApiError::not_found("City not found"))?;

    Ok(ApiResponse::success(CityDashboard {
        city,
        analytics: analytics.into_iter().next(),
        wards,
        zones,
        recent_issues: with_sla(issues, Utc::now()),
        map_points,
    }))
}
