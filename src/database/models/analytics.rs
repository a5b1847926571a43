use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Rows of the precomputed analytics views. Counters are cast to int8 and rates
// to float8 in the queries so view column types can change without breaking
// decoding.

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct StateAnalytics {
    pub total_issues: i64,
    pub open_issues: i64,
    pub resolved_issues: i64,
    pub rejected_issues: i64,
    pub unverified_issues: i64,
    pub in_progress_issues: i64,
    pub sla_compliance_rate: f64,
    pub sla_breached: i64,
    pub total_reporters: i64,
    pub active_workers: i64,
    pub avg_resolution_time_hours: f64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CityAnalytics {
    pub city_id: Uuid,
    pub city_name: String,
    pub total_issues: i64,
    pub open_issues: i64,
    pub resolved_issues: i64,
    pub unverified_issues: i64,
    pub in_progress_issues: i64,
    pub sla_compliance_rate: f64,
    pub critical_issues: i64,
    pub high_priority_issues: i64,
    pub avg_resolution_time_hours: f64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WardAnalytics {
    pub ward_id: Uuid,
    pub ward_name: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub total_issues: i64,
    pub open_issues: i64,
    pub resolved_issues: i64,
    pub in_progress_issues: i64,
    pub assigned_issues: i64,
    pub avg_resolution_time_hours: f64,
    pub active_workers: i64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ZoneAnalytics {
    pub zone_id: Uuid,
    pub zone_name: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub supervisor_user_id: Option<Uuid>,
    pub supervisor_name: Option<String>,
    pub total_issues: i64,
    pub unverified_issues: i64,
    pub verified_issues: i64,
    pub forwarded_issues: i64,
    pub rejected_issues: i64,
    pub resolved_issues: i64,
    pub avg_verification_time_hours: f64,
    pub refreshed_at: Option<DateTime<Utc>>,
}
