use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::CallerError;
use super::scope::ScopeRequest;

/// Flat role name as stored in `users.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    StateAdmin,
    CityAdmin,
    CrcSupervisor,
    WardSupervisor,
    Worker,
    Citizen,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::StateAdmin => "state_admin",
            Role::CityAdmin => "city_admin",
            Role::CrcSupervisor => "crc_supervisor",
            Role::WardSupervisor => "ward_supervisor",
            Role::Worker => "worker",
            Role::Citizen => "citizen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state_admin" => Ok(Role::StateAdmin),
            "city_admin" => Ok(Role::CityAdmin),
            "crc_supervisor" => Ok(Role::CrcSupervisor),
            "ward_supervisor" => Ok(Role::WardSupervisor),
            "worker" => Ok(Role::Worker),
            "citizen" => Ok(Role::Citizen),
            other => Err(CallerError::UnknownRole(other.to_string())),
        }
    }
}

/// A caller's role together with the single jurisdiction it is bound to.
///
/// Each variant carries only the id that matters for its tier, so a city admin
/// without a city cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Caller {
    StateAdmin,
    CityAdmin { city_id: Uuid },
    CrcSupervisor { zone_id: Uuid },
    WardSupervisor { ward_id: Uuid },
    Worker,
    Citizen,
}

impl Caller {
    /// Build a caller from the loose columns of a profile row.
    ///
    /// Ids that do not belong to the role are ignored; a missing id that the role
    /// requires is an error.
    pub fn from_parts(
        role: &str,
        city_id: Option<Uuid>,
        ward_id: Option<Uuid>,
        zone_id: Option<Uuid>,
    ) -> Result<Self, CallerError> {
        let role: Role = role.parse()?;
        let caller = match role {
            Role::StateAdmin => Caller::StateAdmin,
            Role::CityAdmin => Caller::CityAdmin {
                city_id: city_id.ok_or(CallerError::MissingJurisdiction { role, field: "city_id" })?,
            },
            Role::CrcSupervisor => Caller::CrcSupervisor {
                zone_id: zone_id.ok_or(CallerError::MissingJurisdiction { role, field: "zone_id" })?,
            },
            Role::WardSupervisor => Caller::WardSupervisor {
                ward_id: ward_id.ok_or(CallerError::MissingJurisdiction { role, field: "ward_id" })?,
            },
            Role::Worker => Caller::Worker,
            Role::Citizen => Caller::Citizen,
        };
        Ok(caller)
    }

    pub fn role(&self) -> Role {
        match self {
            Caller::StateAdmin => Role::StateAdmin,
            Caller::CityAdmin { .. } => Role::CityAdmin,
            Caller::CrcSupervisor { .. } => Role::CrcSupervisor,
            Caller::WardSupervisor { .. } => Role::WardSupervisor,
            Caller::Worker => Role::Worker,
            Caller::Citizen => Role::Citizen,
        }
    }

    /// Landing dashboard for admin roles; workers and citizens have none.
    pub fn home_scope(&self) -> Option<ScopeRequest> {
        match self {
            Caller::StateAdmin => Some(ScopeRequest::State),
            Caller::CityAdmin { city_id } => Some(ScopeRequest::City(*city_id)),
            Caller::CrcSupervisor { zone_id } => Some(ScopeRequest::Zone(*zone_id)),
            Caller::WardSupervisor { ward_id } => Some(ScopeRequest::Ward(*ward_id)),
            Caller::Worker | Caller::Citizen => None,
        }
    }
}
