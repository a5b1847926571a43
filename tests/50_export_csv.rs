mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use civic_dashboard_api::access::ScopeRequest;
use civic_dashboard_api::database::models::IssueExportRow;
use civic_dashboard_api::export::{export_filename, render_csv, ExportFormat, CSV_HEADERS};
use civic_dashboard_api::types::{IssueStatus, Priority};
use reqwest::StatusCode;
use uuid::Uuid;

fn row(description: &str, day: u32) -> IssueExportRow {
    IssueExportRow {
        id: Uuid::new_v4(),
        category: "water".into(),
        description: description.into(),
        status: IssueStatus::InProgress,
        priority: Priority::Critical,
        address: Some("12, MG Road".into()),
        city_name: Some("Nagpur".into()),
        zone_name: None,
        ward_name: Some("Ward 3".into()),
        created_at: Utc.with_ymd_and_hms(2026, 10, day, 12, 0, 0).unwrap(),
        latitude: Some(21.1458),
        longitude: Some(79.0882),
    }
}

#[test]
fn csv_round_trips_through_a_standard_reader() -> Result<()> {
    let rows = vec![row("Burst \"main\" pipe, flooding", 16), row("Low pressure", 2)];
    let bytes = render_csv(&rows)?;

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADERS.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][2], "Burst \"main\" pipe, flooding");
    assert_eq!(&records[0][3], "in progress");
    assert_eq!(&records[0][4], "critical");
    assert_eq!(&records[0][5], "12, MG Road");
    assert_eq!(&records[0][7], "");
    assert_eq!(&records[0][9], "16 Oct 2026");
    assert_eq!(&records[1][9], "2 Oct 2026");
    assert_eq!(&records[0][10], "21.1458");
    Ok(())
}

#[test]
fn filename_reflects_scope_and_date() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
    let city = Uuid::new_v4();
    assert_eq!(
        export_filename(&ScopeRequest::City(city), ExportFormat::Csv, now),
        format!("reports_city_{}_2026-10-16.csv", city)
    );
}

#[tokio::test]
async fn export_requires_authentication() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/reports/export?scope=state&format=csv"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
