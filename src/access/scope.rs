use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::ScopeParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeDimension {
    State,
    City,
    Zone,
    Ward,
}

impl ScopeDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeDimension::State => "state",
            ScopeDimension::City => "city",
            ScopeDimension::Zone => "zone",
            ScopeDimension::Ward => "ward",
        }
    }
}

impl fmt::Display for ScopeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeDimension {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(ScopeDimension::State),
            "city" => Ok(ScopeDimension::City),
            "zone" => Ok(ScopeDimension::Zone),
            "ward" => Ok(ScopeDimension::Ward),
            other => Err(ScopeParseError::InvalidScope(other.to_string())),
        }
    }
}

/// Target jurisdiction of a dashboard read, a listing, or an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum ScopeRequest {
    State,
    City(Uuid),
    Zone(Uuid),
    Ward(Uuid),
}

impl ScopeRequest {
    /// Parse the `scope` and `id` query parameters.
    ///
    /// `id` is mandatory for every dimension but `state`, where it is ignored.
    pub fn parse(scope: Option<&str>, id: Option<&str>) -> Result<Self, ScopeParseError> {
        let scope = scope
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ScopeParseError::MissingScope)?;
        let dimension: ScopeDimension = scope.parse()?;

        if dimension == ScopeDimension::State {
            return Ok(ScopeRequest::State);
        }

        let raw = id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ScopeParseError::MissingId(dimension.as_str()))?;
        let id = Uuid::parse_str(raw).map_err(|_| ScopeParseError::InvalidId {
            scope: dimension.as_str(),
            value: raw.to_string(),
        })?;

        Ok(Self::with_id(dimension, id))
    }

    /// Scope of the given non-state dimension, or `State` for the state dimension
    pub fn with_id(dimension: ScopeDimension, id: Uuid) -> Self {
        match dimension {
            ScopeDimension::State => ScopeRequest::State,
            ScopeDimension::City => ScopeRequest::City(id),
            ScopeDimension::Zone => ScopeRequest::Zone(id),
            ScopeDimension::Ward => ScopeRequest::Ward(id),
        }
    }

    pub fn dimension(&self) -> ScopeDimension {
        match self {
            ScopeRequest::State => ScopeDimension::State,
            ScopeRequest::City(_) => ScopeDimension::City,
            ScopeRequest::Zone(_) => ScopeDimension::Zone,
            ScopeRequest::Ward(_) => ScopeDimension::Ward,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            ScopeRequest::State => None,
            ScopeRequest::City(id) | ScopeRequest::Zone(id) | ScopeRequest::Ward(id) => Some(*id),
        }
    }
}

impl fmt::Display for ScopeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{}:{}", self.dimension(), id),
            None => write!(f, "{}", self.dimension()),
        }
    }
}

/// Canonical row filter over the `issues` dataset produced by an Allow decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "dimension", content = "id", rename_all = "snake_case")]
pub enum ScopeFilter {
    All,
    City(Uuid),
    Zone(Uuid),
    Ward(Uuid),
}

impl ScopeFilter {
    /// Equality predicate `(column, id)` to apply, or `None` for the full dataset
    pub fn predicate(&self) -> Option<(&'static str, Uuid)> {
        match self {
            ScopeFilter::All => None,
            ScopeFilter::City(id) => Some(("city_id", *id)),
            ScopeFilter::Zone(id) => Some(("zone_id", *id)),
            ScopeFilter::Ward(id) => Some(("ward_id", *id)),
        }
    }

    pub fn dimension(&self) -> ScopeDimension {
        match self {
            ScopeFilter::All => ScopeDimension::State,
            ScopeFilter::City(_) => ScopeDimension::City,
            ScopeFilter::Zone(_) => ScopeDimension::Zone,
            ScopeFilter::Ward(_) => ScopeDimension::Ward,
        }
    }
}

impl From<ScopeRequest> for ScopeFilter {
    fn from(request: ScopeRequest) -> Self {
        match request {
            ScopeRequest::State => ScopeFilter::All,
            ScopeRequest::City(id) => ScopeFilter::City(id),
            ScopeRequest::Zone(id) => ScopeFilter::Zone(id),
            ScopeRequest::Ward(id) => ScopeFilter::Ward(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_state_without_id() {
        assert_eq!(ScopeRequest::parse(Some("state"), None).unwrap(), ScopeRequest::State);
        // a stray id on the state scope is ignored
        assert_eq!(ScopeRequest::parse(Some("state"), Some("nonsense")).unwrap(), ScopeRequest::State);
    }

    #[test]
    fn parses_ward_with_id() {
        let id = Uuid::new_v4();
        let parsed = ScopeRequest::parse(Some("ward"), Some(&id.to_string())).unwrap();
        assert_eq!(parsed, ScopeRequest::Ward(id));
        assert_eq!(parsed.dimension(), ScopeDimension::Ward);
        assert_eq!(parsed.id(), Some(id));
    }

    #[test]
    fn reports_missing_and_invalid_parameters() {
        assert_eq!(ScopeRequest::parse(None, None), Err(ScopeParseError::MissingScope));
        assert_eq!(ScopeRequest::parse(Some("  "), None), Err(ScopeParseError::MissingScope));
        assert_eq!(
            ScopeRequest::parse(Some("district"), None),
            Err(ScopeParseError::InvalidScope("district".into()))
        );
        assert_eq!(ScopeRequest::parse(Some("city"), None), Err(ScopeParseError::MissingId("city")));
        let err = ScopeRequest::parse(Some("zone"), Some("Z1")).unwrap_err();
        assert_eq!(err.field(), "id");
        assert!(matches!(err, ScopeParseError::InvalidId { scope: "zone", .. }));
    }

    #[test]
    fn filter_predicate_uses_dimension_column() {
        let id = Uuid::new_v4();
        assert_eq!(ScopeFilter::All.predicate(), None);
        assert_eq!(ScopeFilter::from(ScopeRequest::Zone(id)).predicate(), Some(("zone_id", id)));
        assert_eq!(ScopeFilter::City(id).dimension(), ScopeDimension::City);
    }
}
