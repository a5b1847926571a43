use civic_dashboard_api::access::{
    issue_visible, resolve, Caller, Decision, DenyReason, IssueJurisdiction, JurisdictionMap, NoHierarchy,
    ScopeFilter, ScopeParseError, ScopeRequest,
};
use uuid::Uuid;

fn ids() -> (Uuid, Uuid, Uuid) {
    (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
}

#[test]
fn state_admin_is_always_allowed() {
    let (c, w, z) = ids();
    for request in [ScopeRequest::State, ScopeRequest::City(c), ScopeRequest::Ward(w), ScopeRequest::Zone(z)] {
        assert!(resolve(&Caller::StateAdmin, &request, &NoHierarchy).is_allowed(), "{}", request);
    }
}

#[test]
fn only_state_admin_reads_state_scope() {
    let (c, w, z) = ids();
    let callers = [
        Caller::CityAdmin { city_id: c },
        Caller::WardSupervisor { ward_id: w },
        Caller::CrcSupervisor { zone_id: z },
        Caller::Worker,
        Caller::Citizen,
    ];
    for caller in callers {
        assert_eq!(
            resolve(&caller, &ScopeRequest::State, &NoHierarchy),
            Decision::Deny { reason: DenyReason::StateScopeReserved }
        );
    }
}

#[test]
fn same_tier_access_requires_equal_id() {
    let c1 = Uuid::new_v4();
    let c2 = Uuid::new_v4();
    let admin = Caller::CityAdmin { city_id: c1 };

    assert_eq!(
        resolve(&admin, &ScopeRequest::City(c1), &NoHierarchy).filter(),
        Some(ScopeFilter::City(c1))
    );
    assert!(!resolve(&admin, &ScopeRequest::City(c2), &NoHierarchy).is_allowed());

    let w1 = Uuid::new_v4();
    let supervisor = Caller::WardSupervisor { ward_id: w1 };
    assert!(resolve(&supervisor, &ScopeRequest::Ward(w1), &NoHierarchy).is_allowed());
    assert!(!resolve(&supervisor, &ScopeRequest::Ward(Uuid::new_v4()), &NoHierarchy).is_allowed());

    let z1 = Uuid::new_v4();
    let crc = Caller::CrcSupervisor { zone_id: z1 };
    assert!(resolve(&crc, &ScopeRequest::Zone(z1), &NoHierarchy).is_allowed());
    assert!(!resolve(&crc, &ScopeRequest::Zone(Uuid::new_v4()), &NoHierarchy).is_allowed());
}

#[test]
fn city_admin_reaches_lower_tiers_through_containment() {
    let (city, ward, zone) = ids();
    let foreign_ward = Uuid::new_v4();
    let hierarchy = JurisdictionMap::new()
        .with_ward(ward, city)
        .with_zone(zone, city)
        .with_ward(foreign_ward, Uuid::new_v4());
    let admin = Caller::CityAdmin { city_id: city };

    assert_eq!(
        resolve(&admin, &ScopeRequest::Ward(ward), &hierarchy).filter(),
        Some(ScopeFilter::Ward(ward))
    );
    assert_eq!(
        resolve(&admin, &ScopeRequest::Zone(zone), &hierarchy).filter(),
        Some(ScopeFilter::Zone(zone))
    );
    assert_eq!(
        resolve(&admin, &ScopeRequest::Ward(foreign_ward), &hierarchy),
        Decision::Deny { reason: DenyReason::OutsideJurisdiction }
    );
    // Unknown ward: no containment fact, no access
    assert!(!resolve(&admin, &ScopeRequest::Ward(Uuid::new_v4()), &hierarchy).is_allowed());
}

#[test]
fn workers_and_citizens_are_denied_everything_but_nothing_panics() {
    let (c, w, z) = ids();
    for caller in [Caller::Worker, Caller::Citizen] {
        for request in [ScopeRequest::City(c), ScopeRequest::Ward(w), ScopeRequest::Zone(z)] {
            assert_eq!(
                resolve(&caller, &request, &NoHierarchy),
                Decision::Deny { reason: DenyReason::RoleNotPermitted }
            );
        }
    }
}

#[test]
fn resolution_is_idempotent() {
    let (city, ward, _) = ids();
    let hierarchy = JurisdictionMap::new().with_ward(ward, city);
    let admin = Caller::CityAdmin { city_id: city };
    let request = ScopeRequest::Ward(ward);

    assert_eq!(resolve(&admin, &request, &hierarchy), resolve(&admin, &request, &hierarchy));
}

#[test]
fn profile_rows_are_validated_when_building_callers() {
    let city = Uuid::new_v4();
    assert_eq!(
        Caller::from_parts("city_admin", Some(city), None, None).unwrap(),
        Caller::CityAdmin { city_id: city }
    );
    assert!(Caller::from_parts("city_admin", None, None, None).is_err());
    assert!(Caller::from_parts("mayor", None, None, None).is_err());
}

#[test]
fn scope_parameters_parse_strictly() {
    let id = Uuid::new_v4();
    assert_eq!(ScopeRequest::parse(Some("state"), Some("ignored")), Ok(ScopeRequest::State));
    assert_eq!(
        ScopeRequest::parse(Some("zone"), Some(&id.to_string())),
        Ok(ScopeRequest::Zone(id))
    );
    assert_eq!(ScopeRequest::parse(None, None), Err(ScopeParseError::MissingScope));
    assert!(matches!(
        ScopeRequest::parse(Some("district"), None),
        Err(ScopeParseError::InvalidScope(_))
    ));
    assert_eq!(ScopeRequest::parse(Some("ward"), None), Err(ScopeParseError::MissingId("ward")));
    assert!(matches!(
        ScopeRequest::parse(Some("city"), Some("42")),
        Err(ScopeParseError::InvalidId { .. })
    ));
}

#[test]
fn issue_visibility_for_ward_supervisor() {
    let (city, ward, zone) = ids();
    let supervisor = Caller::WardSupervisor { ward_id: ward };

    let own = IssueJurisdiction { city_id: Some(city), zone_id: Some(zone), ward_id: Some(ward) };
    let other = IssueJurisdiction { city_id: Some(city), zone_id: Some(zone), ward_id: Some(Uuid::new_v4()) };

    assert!(issue_visible(&supervisor, &own, &NoHierarchy));
    assert!(!issue_visible(&supervisor, &other, &NoHierarchy));
}
