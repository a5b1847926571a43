use axum::{
    extract::Query,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Extension,
};
use chrono::Utc;
use serde::Deserialize;

use crate::access::ScopeRequest;
use crate::config;
use crate::database::Repository;
use crate::error::ApiError;
use crate::export::{
    attachment_disposition, check_row_cap, export_filename, fetch_limit, render_csv, ExportFormat, CSV_CONTENT_TYPE,
};
use crate::middleware::CurrentCaller;
use crate::services::authorize;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub scope: Option<String>,
    pub id: Option<String>,
    pub format: Option<String>,
}

/// GET /api/reports/export?scope&id&format - download the issues in a jurisdiction
pub async fn export_get(
    Query(query): Query<ExportQuery>,
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> Result<Response, ApiError> {
    let request = ScopeRequest::parse(query.scope.as_deref(), query.id.as_deref())?;
    let format = ExportFormat::parse(query.format.as_deref())?;

    let filter = authorize(&current.caller, request, &repo).await?;
    let max_rows = config::config().export.max_rows;
    let rows = repo.export_rows(&filter, fetch_limit(max_rows)).await?;
    check_row_cap(rows.len(), max_rows)?;

    let body = match format {
        ExportFormat::Csv => render_csv(&rows)?,
    };
    let filename = export_filename(&request, format, Utc::now());

    tracing::info!(
        "Export of {} rows for {} by {} ({})",
        rows.len(),
        request,
        current.profile.display_name(),
        current.caller.role()
    );

    Ok((
        [
            (CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, attachment_disposition(&filename)),
        ],
        body,
    )
        .into_response())
}
