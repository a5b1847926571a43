//! Shared enumerations used by the issue model, the SLA evaluator and the export layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Issue lifecycle. `Rejected` is an alternate terminal state reachable from any
/// pre-resolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Submitted,
    CrcVerified,
    ForwardedToWard,
    InProgress,
    Resolved,
    Rejected,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 6] = [
        IssueStatus::Submitted,
        IssueStatus::CrcVerified,
        IssueStatus::ForwardedToWard,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Submitted => "submitted",
            IssueStatus::CrcVerified => "crc_verified",
            IssueStatus::ForwardedToWard => "forwarded_to_ward",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Rejected => "rejected",
        }
    }

    /// Human label used in exports ("forwarded to ward")
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, IssueStatus::Resolved | IssueStatus::Rejected)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError { kind: "issue status", value: s.to_string() })
    }
}

impl TryFrom<String> for IssueStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(ParseEnumError { kind: "priority", value: other.to_string() }),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
