use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access::{Caller, CallerError};

/// Row of `users` needed to identify and scope a dashboard caller
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub city_id: Option<Uuid>,
    pub ward_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
}

impl UserProfile {
    pub fn caller(&self) -> Result<Caller, CallerError> {
        Caller::from_parts(&self.role, self.city_id, self.ward_id, self.zone_id)
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}
