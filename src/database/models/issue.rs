use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access::IssueJurisdiction;
use crate::sla::{self, SlaStatus};
use crate::types::{IssueStatus, Priority};

/// Column list shared by every query that loads full `Issue` rows.
/// Enum columns are cast to text so both Postgres enums and plain text work.
pub const ISSUE_COLUMNS: &str = r#"
    i.id, i.user_id, i.city_id, i.ward_id, i.zone_id,
    i.category, i.description, i.address,
    i.latitude::float8 AS latitude, i.longitude::float8 AS longitude,
    i.priority::text AS priority, i.status::text AS status,
    i.progress::int4 AS progress, i.assigned_to,
    i.sla_allowed_hours::int4 AS sla_allowed_hours, i.sla_due_at,
    i.created_at, i.updated_at
"#;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Issue {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub ward_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub category: String,
    pub description: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    #[sqlx(try_from = "String")]
    pub status: IssueStatus,
    pub progress: Option<i32>,
    pub assigned_to: Option<Uuid>,
    pub sla_allowed_hours: Option<i32>,
    pub sla_due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn jurisdiction(&self) -> IssueJurisdiction {
        IssueJurisdiction {
            city_id: self.city_id,
            zone_id: self.zone_id,
            ward_id: self.ward_id,
        }
    }

    pub fn sla(&self, now: DateTime<Utc>) -> SlaStatus {
        sla::evaluate(self.sla_due_at, self.status, now)
    }

    pub fn into_view(self, now: DateTime<Utc>) -> IssueView {
        let sla = self.sla(now);
        IssueView { issue: self, sla }
    }
}

/// Issue as returned by the API, with its SLA position at response time
#[derive(Debug, Clone, Serialize)]
pub struct IssueView {
    #[serde(flatten)]
    pub issue: Issue,
    pub sla: SlaStatus,
}

/// Marker on a dashboard map; only issues with coordinates are returned
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MapPoint {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    #[sqlx(try_from = "String")]
    pub status: IssueStatus,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
}

/// Flattened row used by the CSV export, with jurisdiction names joined in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IssueExportRow {
    pub id: Uuid,
    pub category: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: IssueStatus,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub address: Option<String>,
    pub city_name: Option<String>,
    pub zone_name: Option<String>,
    pub ward_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Category/status pair, the minimum needed for dashboard tallies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IssueFacet {
    pub category: String,
    #[sqlx(try_from = "String")]
    pub status: IssueStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sla::SlaState;
    use crate::testing::IssueBuilder;
    use chrono::{Duration, TimeZone};

    #[test]
    fn view_carries_sla_and_flattens_issue_fields() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let issue = IssueBuilder::new()
            .status(IssueStatus::InProgress)
            .due_at(now + Duration::hours(3))
            .build();

        let view = issue.into_view(now);
        assert_eq!(view.sla.status, SlaState::Warning);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["sla"]["status"], "warning");
        assert_eq!(json["sla"]["hoursRemaining"], 3.0);
    }

    #[test]
    fn jurisdiction_mirrors_location_columns() {
        let city = Uuid::new_v4();
        let ward = Uuid::new_v4();
        let issue = IssueBuilder::new().located(city, None, Some(ward)).build();

        let j = issue.jurisdiction();
        assert_eq!(j.city_id, Some(city));
        assert_eq!(j.zone_id, None);
        assert_eq!(j.ward_id, Some(ward));
    }
}
