use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::caller::Caller;
use super::scope::{ScopeDimension, ScopeFilter, ScopeRequest};

/// Outcome of resolving a scope request for a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow { filter: ScopeFilter },
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn filter(&self) -> Option<ScopeFilter> {
        match self {
            Decision::Allow { filter } => Some(*filter),
            Decision::Deny { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Only state admins may read the unrestricted dataset
    StateScopeReserved,
    /// Same tier as the caller, different id
    NotOwnJurisdiction,
    /// Lower tier whose parent city is unknown or not the caller's
    OutsideJurisdiction,
    /// No rule grants this role access to this dimension
    RoleNotPermitted,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::StateScopeReserved => "State-wide scope requires a state administrator",
            DenyReason::NotOwnJurisdiction => "Requested jurisdiction is not assigned to this user",
            DenyReason::OutsideJurisdiction => "Requested jurisdiction is outside this user's city",
            DenyReason::RoleNotPermitted => "This role cannot access the requested scope",
        }
    }
}

/// Parent-city lookup for wards and zones
pub trait JurisdictionLookup {
    /// City that contains the given ward or zone. `None` when unknown or when
    /// the dimension has no parent city.
    fn parent_city(&self, dimension: ScopeDimension, id: Uuid) -> Option<Uuid>;
}

/// Lookup that knows nothing; every containment check fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHierarchy;

impl JurisdictionLookup for NoHierarchy {
    fn parent_city(&self, _dimension: ScopeDimension, _id: Uuid) -> Option<Uuid> {
        None
    }
}

/// In-memory ward/zone → city map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JurisdictionMap {
    #[serde(default)]
    pub wards: HashMap<Uuid, Uuid>,
    #[serde(default)]
    pub zones: HashMap<Uuid, Uuid>,
}

impl JurisdictionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ward(mut self, ward_id: Uuid, city_id: Uuid) -> Self {
        self.wards.insert(ward_id, city_id);
        self
    }

    pub fn with_zone(mut self, zone_id: Uuid, city_id: Uuid) -> Self {
        self.zones.insert(zone_id, city_id);
        self
    }

    pub fn insert(&mut self, dimension: ScopeDimension, id: Uuid, city_id: Uuid) {
        match dimension {
            ScopeDimension::Ward => {
                self.wards.insert(id, city_id);
            }
            ScopeDimension::Zone => {
                self.zones.insert(id, city_id);
            }
            ScopeDimension::State | ScopeDimension::City => {}
        }
    }
}

impl JurisdictionLookup for JurisdictionMap {
    fn parent_city(&self, dimension: ScopeDimension, id: Uuid) -> Option<Uuid> {
        match dimension {
            ScopeDimension::Ward => self.wards.get(&id).copied(),
            ScopeDimension::Zone => self.zones.get(&id).copied(),
            ScopeDimension::State | ScopeDimension::City => None,
        }
    }
}

/// Decide whether `caller` may read `request`, and with which row filter.
///
/// Rules apply in order, first match wins:
/// 1. state admins are always allowed; `state` means no filter
/// 2. nobody else may request `state`
/// 3. city admin on its own city, ward supervisor on its own ward, CRC supervisor
///    on its own zone
/// 4. city admin on a ward or zone whose parent city is its own
/// 5. everything else is denied
pub fn resolve(caller: &Caller, request: &ScopeRequest, hierarchy: &impl JurisdictionLookup) -> Decision {
    let allow = |request: ScopeRequest| Decision::Allow { filter: request.into() };
    let deny = |reason: DenyReason| Decision::Deny { reason };

    match (caller, *request) {
        (Caller::StateAdmin, request) => allow(request),
        (_, ScopeRequest::State) => deny(DenyReason::StateScopeReserved),

        (Caller::CityAdmin { city_id }, ScopeRequest::City(id)) => {
            if id == *city_id { allow(*request) } else { deny(DenyReason::NotOwnJurisdiction) }
        }
        (Caller::WardSupervisor { ward_id }, ScopeRequest::Ward(id)) => {
            if id == *ward_id { allow(*request) } else { deny(DenyReason::NotOwnJurisdiction) }
        }
        (Caller::CrcSupervisor { zone_id }, ScopeRequest::Zone(id)) => {
            if id == *zone_id { allow(*request) } else { deny(DenyReason::NotOwnJurisdiction) }
        }

        (Caller::CityAdmin { city_id }, ScopeRequest::Ward(id) | ScopeRequest::Zone(id)) => {
            match hierarchy.parent_city(request.dimension(), id) {
                Some(parent) if parent == *city_id => allow(*request),
                _ => deny(DenyReason::OutsideJurisdiction),
            }
        }

        _ => deny(DenyReason::RoleNotPermitted),
    }
}

/// Jurisdiction columns of a single issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueJurisdiction {
    pub city_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub ward_id: Option<Uuid>,
}

/// An issue is visible when any of its own jurisdictions resolves to Allow
pub fn issue_visible(caller: &Caller, issue: &IssueJurisdiction, hierarchy: &impl JurisdictionLookup) -> bool {
    if matches!(caller, Caller::StateAdmin) {
        return true;
    }

    [
        issue.city_id.map(ScopeRequest::City),
        issue.zone_id.map(ScopeRequest::Zone),
        issue.ward_id.map(ScopeRequest::Ward),
    ]
    .into_iter()
    .flatten()
    .any(|request| resolve(caller, &request, hierarchy).is_allowed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_admin_narrows_without_ownership_check() {
        let ward = Uuid::new_v4();
        let decision = resolve(&Caller::StateAdmin, &ScopeRequest::Ward(ward), &NoHierarchy);
        assert_eq!(decision, Decision::Allow { filter: ScopeFilter::Ward(ward) });
        assert_eq!(
            resolve(&Caller::StateAdmin, &ScopeRequest::State, &NoHierarchy).filter(),
            Some(ScopeFilter::All)
        );
    }

    #[test]
    fn city_admin_reaches_ward_in_own_city_only() {
        let city = Uuid::new_v4();
        let other_city = Uuid::new_v4();
        let own_ward = Uuid::new_v4();
        let foreign_ward = Uuid::new_v4();
        let hierarchy = JurisdictionMap::new()
            .with_ward(own_ward, city)
            .with_ward(foreign_ward, other_city);
        let caller = Caller::CityAdmin { city_id: city };

        assert!(resolve(&caller, &ScopeRequest::Ward(own_ward), &hierarchy).is_allowed());
        assert_eq!(
            resolve(&caller, &ScopeRequest::Ward(foreign_ward), &hierarchy),
            Decision::Deny { reason: DenyReason::OutsideJurisdiction }
        );
        assert_eq!(
            resolve(&caller, &ScopeRequest::Ward(own_ward), &NoHierarchy),
            Decision::Deny { reason: DenyReason::OutsideJurisdiction }
        );
    }

    #[test]
    fn supervisors_do_not_cross_tiers() {
        let city = Uuid::new_v4();
        let zone = Uuid::new_v4();
        let ward = Uuid::new_v4();
        let hierarchy = JurisdictionMap::new().with_zone(zone, city).with_ward(ward, city);

        let crc = Caller::CrcSupervisor { zone_id: zone };
        assert_eq!(
            resolve(&crc, &ScopeRequest::Ward(ward), &hierarchy),
            Decision::Deny { reason: DenyReason::RoleNotPermitted }
        );
        assert!(!resolve(&crc, &ScopeRequest::City(city), &hierarchy).is_allowed());

        let ward_sup = Caller::WardSupervisor { ward_id: ward };
        assert!(!resolve(&ward_sup, &ScopeRequest::Zone(zone), &hierarchy).is_allowed());
    }

    #[test]
    fn issue_visibility_uses_any_matching_jurisdiction() {
        let city = Uuid::new_v4();
        let zone = Uuid::new_v4();
        let ward = Uuid::new_v4();
        let issue = IssueJurisdiction { city_id: Some(city), zone_id: Some(zone), ward_id: Some(ward) };

        assert!(issue_visible(&Caller::CityAdmin { city_id: city }, &issue, &NoHierarchy));
        assert!(issue_visible(&Caller::CrcSupervisor { zone_id: zone }, &issue, &NoHierarchy));
        assert!(issue_visible(&Caller::WardSupervisor { ward_id: ward }, &issue, &NoHierarchy));
        assert!(!issue_visible(&Caller::WardSupervisor { ward_id: Uuid::new_v4() }, &issue, &NoHierarchy));
        assert!(!issue_visible(&Caller::Citizen, &issue, &NoHierarchy));
        assert!(issue_visible(&Caller::StateAdmin, &IssueJurisdiction::default(), &NoHierarchy));
    }
}
