use axum::{extract::Path, Extension};
use chrono::Utc;
use serde::Serialize;

use crate::access::DenyReason;
use crate::database::models::{AuditLog, IssueView};
use crate::database::Repository;
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentCaller};
use crate::services::{authorize_issue, require_admin, ScopeError};

const ISSUE_NOT_FOUND: &str = "Issue not found";

#[derive(Debug, Serialize)]
pub struct IssueDetail {
    #[serde(flatten)]
    pub issue: IssueView,
    pub audit_trail: Vec<AuditLog>,
}

/// GET /api/issues/:id - one issue with SLA and audit trail, if in the caller's jurisdiction.
///
/// Issues outside the caller's jurisdiction answer 404 like missing ones.
pub async fn issue_get(
    Path(id): Path<String>,
    Extension(current): Extension<CurrentCaller>,
    Extension(repo): Extension<Repository>,
) -> ApiResult<IssueDetail> {
    let id = path_id("id", &id)?;
    require_admin(&current.caller)?;

    let issue = repo
        .issue(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ISSUE_NOT_FOUND))?;

    authorize_issue(&current.caller, &issue.jurisdiction(), &repo)
        .await
        .map_err(conceal_outside)?;

    let audit_trail = repo.audit_logs(id).await?;

    Ok(ApiResponse::success(IssueDetail {
        issue: issue.into_view(Utc::now()),
        audit_trail,
    }))
}

fn conceal_outside(err: ScopeError) -> ApiError {
    match err {
        ScopeError::Denied(DenyReason::OutsideJurisdiction) => ApiError::not_found(ISSUE_NOT_FOUND),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseError;

    #[test]
    fn foreign_issue_looks_missing() {
        let err = conceal_outside(ScopeError::Denied(DenyReason::OutsideJurisdiction));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), ISSUE_NOT_FOUND);
    }

    #[test]
    fn role_refusal_and_lookup_failures_pass_through() {
        assert_eq!(conceal_outside(ScopeError::Denied(DenyReason::RoleNotPermitted)).status_code(), 403);
        let lookup = ScopeError::Lookup(DatabaseError::Sqlx(sqlx::Error::Protocol("bad row".into())));
        assert_eq!(conceal_outside(lookup).status_code(), 500);
    }
}
