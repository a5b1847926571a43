//! Report export: format selection, CSV rendering and download filenames.

pub mod writer;

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::access::ScopeRequest;

pub use writer::{render_csv, CSV_HEADERS};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported format")]
pub struct UnsupportedFormat(pub String);

impl ExportFormat {
    /// Absent or empty means CSV
    pub fn parse(format: Option<&str>) -> Result<Self, UnsupportedFormat> {
        match format {
            None | Some("") => Ok(ExportFormat::Csv),
            Some(other) => other.parse(),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}

/// Refusal for an export larger than the configured row cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Export exceeds the {limit} row limit; narrow the scope")]
pub struct ExportTooLarge {
    pub limit: i64,
}

/// Rows to ask the database for: one past the cap, so overflow is detectable
pub fn fetch_limit(max_rows: Option<i64>) -> Option<i64> {
    max_rows.map(|max| max.saturating_add(1))
}

/// Fail rather than hand back a truncated export
pub fn check_row_cap(row_count: usize, max_rows: Option<i64>) -> Result<(), ExportTooLarge> {
    match max_rows {
        Some(limit) if i64::try_from(row_count).unwrap_or(i64::MAX) > limit => Err(ExportTooLarge { limit }),
        _ => Ok(()),
    }
}

/// `reports_{scope}_{id|all}_{YYYY-MM-DD}.{ext}`, dated at `now` in UTC
pub fn export_filename(request: &ScopeRequest, format: ExportFormat, now: DateTime<Utc>) -> String {
    let id = request.id().map(|id| id.to_string()).unwrap_or_else(|| "all".to_string());
    format!(
        "reports_{}_{}_{}.{}",
        request.dimension(),
        id,
        now.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Value for the Content-Disposition header
pub fn attachment_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}
