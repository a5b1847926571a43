use axum::{extract::Query, Extension};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;

use crate::access::ScopeRequest;
use crate::database::models::IssueView;
use crate::database::{IssueQuery, Repository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::authorize;
use crate::types::IssueStatus;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub scope: Option<String>,
    pub id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub q: Option<String>,
}

/// GET /api/issues?scope&id&status&q - issues in a jurisdiction, newest first, with SLA
pub async fn issues_get(
    Query(query): Query<ListQuery>,
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<Vec<IssueView>> {
    let request = ScopeRequest::parse(query.scope.as_deref(), query.id.as_deref())?;
    let status = parse_status(query.status.as_deref())?;
    let limit = query.limit.filter(|l| *l > 0);

    let filter = authorize(&current.caller, request, &repo).await?;
    let issues = repo
        .issues(&filter, IssueQuery { status, limit, search: None }.with_search(query.q.as_deref()))
        .await?;

    let now = Utc::now();
    Ok(ApiResponse::success(
        issues.into_iter().map(|issue| issue.into_view(now)).collect(),
    ))
}

fn parse_status(raw: Option<&str>) -> Result<Option<IssueStatus>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse::<IssueStatus>().map(Some).map_err(|e| {
            let mut field_errors = HashMap::new();
            field_errors.insert("status".to_string(), e.to_string());
            ApiError::validation_error("Invalid status filter", Some(field_errors))
        }),
    }
}
