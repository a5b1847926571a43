use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Worker account joined with its contractor profile
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contractor {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city_id: Option<Uuid>,
    pub city_name: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub active_assignments: Option<i32>,
    pub completed_assignments: Option<i32>,
}
