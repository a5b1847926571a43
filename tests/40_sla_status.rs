use chrono::{DateTime, Duration, TimeZone, Utc};
use civic_dashboard_api::sla::{evaluate, SlaState, SlaStatus};
use civic_dashboard_api::types::IssueStatus;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn three_hours_left_is_warning() {
    let sla = evaluate(Some(now() + Duration::hours(3)), IssueStatus::InProgress, now());
    assert_eq!(sla, SlaStatus { status: SlaState::Warning, hours_remaining: Some(3.0) });
}

#[test]
fn twelve_hours_overdue_is_breached_with_zero_remaining() {
    let sla = evaluate(Some(now() - Duration::hours(12)), IssueStatus::ForwardedToWard, now());
    assert_eq!(sla, SlaStatus { status: SlaState::Breached, hours_remaining: Some(0.0) });
}

#[test]
fn a_day_left_is_compliant() {
    let sla = evaluate(Some(now() + Duration::hours(24)), IssueStatus::Submitted, now());
    assert_eq!(sla, SlaStatus { status: SlaState::Compliant, hours_remaining: Some(24.0) });
}

#[test]
fn resolved_overrides_any_deadline() {
    for due in [now() - Duration::hours(48), now() + Duration::hours(1), now() + Duration::hours(100)] {
        let sla = evaluate(Some(due), IssueStatus::Resolved, now());
        assert_eq!(sla, SlaStatus { status: SlaState::Resolved, hours_remaining: None });
    }
}

#[test]
fn missing_deadline_is_compliant_for_every_status() {
    for status in IssueStatus::ALL {
        let sla = evaluate(None, status, now());
        assert_eq!(sla, SlaStatus { status: SlaState::Compliant, hours_remaining: None }, "{}", status);
    }
}

#[test]
fn evaluation_is_idempotent() {
    let due = Some(now() + Duration::minutes(90));
    assert_eq!(
        evaluate(due, IssueStatus::InProgress, now()),
        evaluate(due, IssueStatus::InProgress, now())
    );
}
