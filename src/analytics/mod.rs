//! Single-pass aggregates computed over issue facets and contractor rows
//! for the dashboard panels that have no precomputed view.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::database::models::{Contractor, IssueFacet};
use crate::types::IssueStatus;

/// Categories shown on the state dashboard; anything else counts as `others`
pub const VALID_CATEGORIES: [&str; 5] = ["road", "water", "electricity", "garbage", "others"];

const FALLBACK_CATEGORY: &str = "others";

/// Issue count per status, every status present even when zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTally(BTreeMap<&'static str, i64>);

impl StatusTally {
    pub fn from_facets<'a>(facets: impl IntoIterator<Item = &'a IssueFacet>) -> Self {
        let mut counts: BTreeMap<&'static str, i64> = IssueStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        for facet in facets {
            *counts.entry(facet.status.as_str()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn get(&self, status: IssueStatus) -> i64 {
        self.0.get(status.as_str()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub total: i64,
    pub resolved: i64,
    pub open: i64,
}

/// Per-category totals; an issue is open when it is not resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown(BTreeMap<&'static str, CategoryCounts>);

impl CategoryBreakdown {
    pub fn from_facets<'a>(facets: impl IntoIterator<Item = &'a IssueFacet>) -> Self {
        let mut counts: BTreeMap<&'static str, CategoryCounts> =
            VALID_CATEGORIES.iter().map(|c| (*c, CategoryCounts::default())).collect();

        for facet in facets {
            let key = VALID_CATEGORIES
                .iter()
                .find(|c| facet.category.eq_ignore_ascii_case(c))
                .copied()
                .unwrap_or(FALLBACK_CATEGORY);
            let entry = counts.entry(key).or_default();
            entry.total += 1;
            if facet.status == IssueStatus::Resolved {
                entry.resolved += 1;
            } else {
                entry.open += 1;
            }
        }
        Self(counts)
    }

    pub fn get(&self, category: &str) -> CategoryCounts {
        self.0.get(category).copied().unwrap_or_default()
    }
}

/// Headline numbers for the CRC (zone) dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneKpis {
    pub total: i64,
    pub unverified: i64,
    pub forwarded: i64,
    pub rejected: i64,
}

impl ZoneKpis {
    pub fn from_facets<'a>(facets: impl IntoIterator<Item = &'a IssueFacet>) -> Self {
        facets.into_iter().fold(Self::default(), |mut kpis, facet| {
            kpis.total += 1;
            match facet.status {
                IssueStatus::Submitted => kpis.unverified += 1,
                IssueStatus::ForwardedToWard => kpis.forwarded += 1,
                IssueStatus::Rejected => kpis.rejected += 1,
                _ => {}
            }
            kpis
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub count: usize,
    pub active_assignments: i64,
    pub completed_assignments: i64,
    /// Mean rating over workers that have one, to one decimal place
    pub average_rating: Option<f64>,
}

impl WorkerSummary {
    pub fn from_contractors(contractors: &[Contractor]) -> Self {
        let mut summary = Self { count: contractors.len(), ..Self::default() };
        let mut rating_sum = 0.0;
        let mut rated = 0usize;

        for contractor in contractors {
            summary.active_assignments += i64::from(contractor.active_assignments.unwrap_or(0));
            summary.completed_assignments += i64::from(contractor.completed_assignments.unwrap_or(0));
            if let Some(rating) = contractor.rating {
                rating_sum += rating;
                rated += 1;
            }
        }

        if rated > 0 {
            summary.average_rating = Some((rating_sum / rated as f64 * 10.0).round() / 10.0);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn facet(category: &str, status: IssueStatus) -> IssueFacet {
        IssueFacet { category: category.to_string(), status }
    }

    fn worker(rating: Option<f64>, active: i32, completed: i32) -> Contractor {
        Contractor {
            id: Uuid::new_v4(),
            full_name: None,
            email: None,
            phone: None,
            city_id: None,
            city_name: None,
            specializations: None,
            rating,
            active_assignments: Some(active),
            completed_assignments: Some(completed),
        }
    }

    #[test]
    fn status_tally_lists_every_status() {
        let facets = vec![
            facet("road", IssueStatus::Submitted),
            facet("road", IssueStatus::Submitted),
            facet("water", IssueStatus::Resolved),
        ];
        let tally = StatusTally::from_facets(&facets);
        assert_eq!(tally.get(IssueStatus::Submitted), 2);
        assert_eq!(tally.get(IssueStatus::Rejected), 0);
        assert_eq!(tally.total(), 3);

        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json.as_object().unwrap().len(), IssueStatus::ALL.len());
    }

    #[test]
    fn unknown_categories_fold_into_others() {
        let facets = vec![
            facet("Road", IssueStatus::Resolved),
            facet("road", IssueStatus::InProgress),
            facet("streetlight", IssueStatus::Submitted),
            facet("others", IssueStatus::Rejected),
        ];
        let breakdown = CategoryBreakdown::from_facets(&facets);
        assert_eq!(breakdown.get("road"), CategoryCounts { total: 2, resolved: 1, open: 1 });
        assert_eq!(breakdown.get("others"), CategoryCounts { total: 2, resolved: 0, open: 2 });
        assert_eq!(breakdown.get("water"), CategoryCounts::default());
    }

    #[test]
    fn zone_kpis_count_queue_states() {
        let facets = vec![
            facet("road", IssueStatus::Submitted),
            facet("road", IssueStatus::ForwardedToWard),
            facet("road", IssueStatus::Rejected),
            facet("road", IssueStatus::CrcVerified),
        ];
        assert_eq!(
            ZoneKpis::from_facets(&facets),
            ZoneKpis { total: 4, unverified: 1, forwarded: 1, rejected: 1 }
        );
    }

    #[test]
    fn worker_summary_averages_only_rated_workers() {
        let workers = vec![worker(Some(4.0), 2, 10), worker(Some(4.5), 1, 3), worker(None, 0, 0)];
        let summary = WorkerSummary::from_contractors(&workers);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.active_assignments, 3);
        assert_eq!(summary.completed_assignments, 13);
        assert_eq!(summary.average_rating, Some(4.3));

        assert_eq!(WorkerSummary::from_contractors(&[]).average_rating, None);
    }
}
