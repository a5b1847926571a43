use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::database::models::IssueExportRow;

pub const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Category",
    "Description",
    "Status",
    "Priority",
    "Address",
    "City",
    "Zone",
    "Ward",
    "Created At",
    "Latitude",
    "Longitude",
];

/// Render export rows as CSV, in the order given.
///
/// Text fields are always quoted with embedded quotes doubled; coordinates
/// stay bare so spreadsheets read them as numbers.
pub fn render_csv(rows: &[IssueExportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.write_record(record(row))?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

fn record(row: &IssueExportRow) -> [String; 12] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let coordinate = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    [
        row.id.to_string(),
        row.category.clone(),
        row.description.clone(),
        row.status.label(),
        row.priority.to_string(),
        text(&row.address),
        text(&row.city_name),
        text(&row.zone_name),
        text(&row.ward_name),
        row.created_at.format("%-d %b %Y").to_string(),
        coordinate(row.latitude),
        coordinate(row.longitude),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueStatus, Priority};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn row() -> IssueExportRow {
        IssueExportRow {
            id: Uuid::parse_str("0a0b0c0d-0000-4000-8000-00000000000e").unwrap(),
            category: "road".into(),
            description: "Pothole near \"Gandhi\" circle, lane 2".into(),
            status: IssueStatus::ForwardedToWard,
            priority: Priority::High,
            address: None,
            city_name: Some("Pune".into()),
            zone_name: Some("Zone A".into()),
            ward_name: Some("Ward 7".into()),
            created_at: Utc.with_ymd_and_hms(2026, 10, 6, 8, 30, 0).unwrap(),
            latitude: Some(18.52),
            longitude: Some(73.85),
        }
    }

    fn render(rows: &[IssueExportRow]) -> String {
        String::from_utf8(render_csv(rows).unwrap()).unwrap()
    }

    #[test]
    fn header_only_for_empty_export() {
        let out = render(&[]);
        assert_eq!(
            out,
            "\"ID\",\"Category\",\"Description\",\"Status\",\"Priority\",\"Address\",\"City\",\"Zone\",\"Ward\",\"Created At\",\"Latitude\",\"Longitude\"\n"
        );
    }

    #[test]
    fn escapes_quotes_and_keeps_commas_inside_field() {
        let out = render(&[row()]);
        let line = out.lines().nth(1).unwrap();
        assert!(line.contains("\"Pothole near \"\"Gandhi\"\" circle, lane 2\""));
        assert!(line.contains("\"forwarded to ward\""));
        assert!(line.contains("\"6 Oct 2026\""));
        assert!(line.ends_with(",18.52,73.85"));
    }

    #[test]
    fn missing_values_render_empty() {
        let mut r = row();
        r.latitude = None;
        r.longitude = None;
        let out = render(&[r]);
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), CSV_HEADERS.len());
        assert_eq!(&record[5], "");
        assert_eq!(&record[10], "");
        assert_eq!(&record[2], "Pothole near \"Gandhi\" circle, lane 2");
    }
}
