use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub state: Option<String>,
    pub population: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ward {
    pub id: Uuid,
    pub name: String,
    pub city_id: Uuid,
    pub city_name: Option<String>,
    pub population: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    pub city_id: Uuid,
    pub city_name: Option<String>,
    pub ward_ids: Option<Vec<Uuid>>,
    pub supervisor_user_id: Option<Uuid>,
    pub supervisor_name: Option<String>,
}

/// Id/name pair for sub-jurisdiction lists on a dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JurisdictionRef {
    pub id: Uuid,
    pub name: String,
}
