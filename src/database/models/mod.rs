pub mod analytics;
pub mod audit;
pub mod contractor;
pub mod issue;
pub mod jurisdiction;
pub mod user;

pub use analytics::{CityAnalytics, StateAnalytics, WardAnalytics, ZoneAnalytics};
pub use audit::AuditLog;
pub use contractor::Contractor;
pub use issue::{Issue, IssueExportRow, IssueFacet, IssueView, MapPoint, ISSUE_COLUMNS};
pub use jurisdiction::{City, JurisdictionRef, Ward, Zone};
pub use user::UserProfile;
