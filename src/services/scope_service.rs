use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::access::{
    issue_visible, resolve, Caller, Decision, DenyReason, IssueJurisdiction, JurisdictionMap, ScopeDimension,
    ScopeFilter, ScopeRequest,
};
use crate::config;
use crate::database::{DatabaseError, Repository};

/// Source of ward/zone → city containment facts
#[async_trait]
pub trait JurisdictionDirectory: Send + Sync {
    async fn parent_city(&self, dimension: ScopeDimension, id: Uuid) -> Result<Option<Uuid>, DatabaseError>;
}

#[async_trait]
impl JurisdictionDirectory for Repository {
    async fn parent_city(&self, dimension: ScopeDimension, id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        Repository::parent_city(self, dimension, id).await
    }
}

/// Directory backed by a fixed map, for offline checks and tests
#[async_trait]
impl JurisdictionDirectory for JurisdictionMap {
    async fn parent_city(&self, dimension: ScopeDimension, id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        use crate::access::JurisdictionLookup;
        Ok(JurisdictionLookup::parent_city(self, dimension, id))
    }
}

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("{}", .0.message())]
    Denied(DenyReason),

    #[error("Jurisdiction lookup failed: {0}")]
    Lookup(#[from] DatabaseError),
}

/// Resolve `request` for `caller`, fetching the containment facts the resolver
/// needs first. Returns the row filter to apply on Allow.
pub async fn authorize<D>(caller: &Caller, request: ScopeRequest, directory: &D) -> Result<ScopeFilter, ScopeError>
where
    D: JurisdictionDirectory + ?Sized,
{
    let mut hierarchy = JurisdictionMap::new();

    // Only a city admin reaching into a ward or zone needs the parent city
    if let (Caller::CityAdmin { .. }, ScopeRequest::Ward(id) | ScopeRequest::Zone(id)) = (caller, request) {
        if let Some(city_id) = directory.parent_city(request.dimension(), id).await? {
            hierarchy.insert(request.dimension(), id, city_id);
        }
    }

    match resolve(caller, &request, &hierarchy) {
        Decision::Allow { filter } => {
            if config::config().security.enable_audit_logging {
                tracing::info!("Scope granted: {} on {}", caller.role(), request);
            }
            Ok(filter)
        }
        Decision::Deny { reason } => {
            tracing::warn!("Scope denied: {} on {} ({:?})", caller.role(), request, reason);
            Err(ScopeError::Denied(reason))
        }
    }
}

/// Workers and citizens have no dashboard jurisdiction at all
pub fn require_admin(caller: &Caller) -> Result<(), ScopeError> {
    match caller.home_scope() {
        Some(_) => Ok(()),
        None => {
            tracing::warn!("Admin read refused for {}", caller.role());
            Err(ScopeError::Denied(DenyReason::RoleNotPermitted))
        }
    }
}

/// Check that a single issue falls inside the caller's jurisdiction
pub async fn authorize_issue<D>(caller: &Caller, issue: &IssueJurisdiction, directory: &D) -> Result<(), ScopeError>
where
    D: JurisdictionDirectory + ?Sized,
{
    require_admin(caller)?;

    let mut hierarchy = JurisdictionMap::new();

    if let Caller::CityAdmin { city_id } = caller {
        if issue.city_id != Some(*city_id) {
            let lower = [
                (ScopeDimension::Ward, issue.ward_id),
                (ScopeDimension::Zone, issue.zone_id),
            ];
            for (dimension, id) in lower {
                let Some(id) = id else { continue };
                if let Some(parent) = directory.parent_city(dimension, id).await? {
                    hierarchy.insert(dimension, id, parent);
                }
            }
        }
    }

    if issue_visible(caller, issue, &hierarchy) {
        Ok(())
    } else {
        tracing::warn!("Issue outside jurisdiction of {}", caller.role());
        Err(ScopeError::Denied(DenyReason::OutsideJurisdiction))
    }
}

/// City scope for the contractor listing.
///
/// State admins see every worker; city admins their own city; ward supervisors
/// the city that contains their ward.
pub async fn contractor_scope<D>(caller: &Caller, directory: &D) -> Result<ScopeFilter, ScopeError>
where
    D: JurisdictionDirectory + ?Sized,
{
    match caller {
        Caller::StateAdmin => Ok(ScopeFilter::All),
        Caller::CityAdmin { city_id } => Ok(ScopeFilter::City(*city_id)),
        Caller::WardSupervisor { ward_id } => directory
            .parent_city(ScopeDimension::Ward, *ward_id)
            .await?
            .map(ScopeFilter::City)
            .ok_or(ScopeError::Denied(DenyReason::OutsideJurisdiction)),
        Caller::CrcSupervisor { .. } | Caller::Worker | Caller::Citizen => {
            Err(ScopeError::Denied(DenyReason::RoleNotPermitted))
        }
    }
}
