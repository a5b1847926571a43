// handlers/dashboard/mod.rs - Per-tier dashboard reads
//
// Each handler resolves the page's scope for the caller first; data is only
// fetched once the scope service returns a filter.

pub mod city;
pub mod state;
pub mod ward;
pub mod zone;

pub use city::city_get;
pub use state::state_get;
pub use ward::ward_get;
pub use zone::zone_get;

use chrono::{DateTime, Utc};

use crate::config;
use crate::database::models::{Issue, IssueView};
use crate::database::IssueQuery;
use crate::types::IssueStatus;

/// Newest issues shown in the "recent" panel
pub(crate) fn recent() -> IssueQuery {
    IssueQuery {
        status: None,
        limit: Some(config::config().api.recent_issue_limit),
        ..IssueQuery::default()
    }
}

/// Every issue in one status, newest first
pub(crate) fn queue(status: IssueStatus) -> IssueQuery {
    IssueQuery {
        status: Some(status),
        ..IssueQuery::default()
    }
}

/// Attach SLA status to every issue at a single `now`
pub(crate) fn with_sla(issues: Vec<Issue>, now: DateTime<Utc>) -> Vec<IssueView> {
    issues.into_iter().map(|issue| issue.into_view(now)).collect()
}
