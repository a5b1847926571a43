use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::access::{Caller, JurisdictionMap};
use crate::database::models::Issue;
use crate::types::{IssueStatus, Priority};

/// Builder for `Issue` values in unit tests
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    pub fn new() -> Self {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Self {
            issue: Issue {
                id: Uuid::new_v4(),
                user_id: None,
                city_id: None,
                ward_id: None,
                zone_id: None,
                category: "road".to_string(),
                description: "Pothole on main road".to_string(),
                address: None,
                latitude: None,
                longitude: None,
                priority: Priority::Medium,
                status: IssueStatus::Submitted,
                progress: None,
                assigned_to: None,
                sla_allowed_hours: None,
                sla_due_at: None,
                created_at: created,
                updated_at: created,
            },
        }
    }

    pub fn status(mut self, status: IssueStatus) -> Self {
        self.issue.status = status;
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.issue.sla_due_at = Some(due_at);
        self
    }

    pub fn located(mut self, city_id: Uuid, zone_id: Option<Uuid>, ward_id: Option<Uuid>) -> Self {
        self.issue.city_id = Some(city_id);
        self.issue.zone_id = zone_id;
        self.issue.ward_id = ward_id;
        self
    }

    pub fn build(self) -> Issue {
        self.issue
    }
}

impl Default for IssueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One city with a ward and a zone, plus a second unrelated city
pub struct Jurisdictions {
    pub city: Uuid,
    pub ward: Uuid,
    pub zone: Uuid,
    pub other_city: Uuid,
    pub other_ward: Uuid,
}

impl Jurisdictions {
    pub fn new() -> Self {
        Self {
            city: Uuid::new_v4(),
            ward: Uuid::new_v4(),
            zone: Uuid::new_v4(),
            other_city: Uuid::new_v4(),
            other_ward: Uuid::new_v4(),
        }
    }

    pub fn hierarchy(&self) -> JurisdictionMap {
        JurisdictionMap::new()
            .with_ward(self.ward, self.city)
            .with_zone(self.zone, self.city)
            .with_ward(self.other_ward, self.other_city)
    }

    pub fn city_admin(&self) -> Caller {
        Caller::CityAdmin { city_id: self.city }
    }

    pub fn ward_supervisor(&self) -> Caller {
        Caller::WardSupervisor { ward_id: self.ward }
    }

    pub fn crc_supervisor(&self) -> Caller {
        Caller::CrcSupervisor { zone_id: self.zone }
    }
}

impl Default for Jurisdictions {
    fn default() -> Self {
        Self::new()
    }
}
