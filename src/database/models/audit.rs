use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Entry in an issue's audit trail, newest first
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub issue_id: Option<Uuid>,
    pub action: String,
    pub performed_by: Option<Uuid>,
    pub performer_name: Option<String>,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
    pub created_at: DateTime<Utc>,
}
