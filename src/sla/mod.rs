//! SLA classification of issues against their due time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::IssueStatus;

/// Remaining-time window, in hours, inside which an open issue is flagged.
/// Fixed policy; not configurable per category.
pub const WARNING_WINDOW_HOURS: f64 = 6.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaState {
    Compliant,
    Warning,
    Breached,
    Resolved,
}

impl SlaState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaState::Compliant => "compliant",
            SlaState::Warning => "warning",
            SlaState::Breached => "breached",
            SlaState::Resolved => "resolved",
        }
    }
}

impl fmt::Display for SlaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlaStatus {
    pub status: SlaState,
    #[serde(rename = "hoursRemaining", skip_serializing_if = "Option::is_none")]
    pub hours_remaining: Option<f64>,
}

impl SlaStatus {
    fn bare(status: SlaState) -> Self {
        Self { status, hours_remaining: None }
    }

    fn timed(status: SlaState, hours: f64) -> Self {
        Self { status, hours_remaining: Some(hours) }
    }

    /// Remaining hours floored to whole hours, as shown on dashboards
    pub fn display_hours(&self) -> Option<i64> {
        self.hours_remaining.map(|h| h.floor() as i64)
    }

    /// Short text for report views, e.g. "warning (3h left)"
    pub fn describe(&self) -> String {
        match (self.status, self.display_hours()) {
            (SlaState::Compliant | SlaState::Warning, Some(hours)) => format!("{} ({}h left)", self.status, hours),
            (status, _) => status.to_string(),
        }
    }
}

/// Classify an issue's SLA position at `now`.
///
/// A resolved issue is always `Resolved`; an issue without a due time is always
/// `Compliant`. Overdue issues report zero hours remaining.
pub fn evaluate(due_at: Option<DateTime<Utc>>, status: IssueStatus, now: DateTime<Utc>) -> SlaStatus {
    let Some(due_at) = due_at else {
        return SlaStatus::bare(SlaState::Compliant);
    };

    if status == IssueStatus::Resolved {
        return SlaStatus::bare(SlaState::Resolved);
    }

    let hours_remaining = (due_at - now).num_milliseconds() as f64 / MILLIS_PER_HOUR;

    if hours_remaining < 0.0 {
        SlaStatus::timed(SlaState::Breached, 0.0)
    } else if hours_remaining < WARNING_WINDOW_HOURS {
        SlaStatus::timed(SlaState::Warning, hours_remaining)
    } else {
        SlaStatus::timed(SlaState::Compliant, hours_remaining)
    }
}
