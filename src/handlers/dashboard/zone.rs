// handlers/dashboard/zone.rs - GET /api/dashboard/zone/:zone_id handler (CRC)

use axum::{
    extract::{Path, Query},
    Extension,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{queue, recent, with_sla};
use crate::access::ScopeDimension;
use crate::analytics::ZoneKpis;
use crate::database::models::{IssueView, JurisdictionRef, MapPoint, Zone, ZoneAnalytics};
use crate::database::Repository;
use crate::error::ApiError;
use crate::handlers::path_scope;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::authorize;
use crate::types::IssueStatus;

#[derive(Debug, Serialize)]
pub struct ZoneDashboard {
    pub zone: Zone,
    pub analytics: Option<ZoneAnalytics>,
    pub kpis: ZoneKpis,
    /// Submitted issues awaiting CRC verification
    pub unverified_queue: Vec<IssueView>,
    pub recent_issues: Vec<IssueView>,
    pub wards: Vec<JurisdictionRef>,
    pub map_points: Vec<MapPoint>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZoneQuery {
    /// Narrows the unverified queue by id, description or category
    pub q: Option<String>,
}

/// GET /api/dashboard/zone/:zone_id?q - CRC verification queue for one zone
pub async fn zone_get(
    Path(zone_id): Path<String>,
    Query(query): Query<ZoneQuery>,
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<ZoneDashboard> {
    let request = path_scope(ScopeDimension::Zone, &zone_id)?;
    let filter = authorize(&current.caller, request, &repo).await?;
    let Some(zone_id) = request.id() else {
        return Err(ApiError::bad_request("Zone id required"));
    };

    let zone = repo
        .zone(zone_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Zone not found"))?;
    let ward_ids = zone.ward_ids.clone().unwrap_or_default();

    let (analytics, unverified, issues, wards, map_points, facets) = tokio::try_join!(
        repo.zone_analytics(zone_id),
        repo.issues(&filter, queue(IssueStatus::Submitted).with_search(query.q.as_deref())),
        repo.issues(&filter, recent()),
        repo.wards_by_ids(&ward_ids),
        repo.map_points(&filter),
        repo.facets(&filter),
    )?;

    let now = Utc::now();
    Ok(ApiResponse::success(ZoneDashboard {
        zone,
        analytics,
        kpis: ZoneKpis::from_facets(&facets),
        unverified_queue: with_sla(unverified, now),
        recent_issues: with_sla(issues, now),
        wards,
        map_points,
    }))
}
