use thiserror::Error;

use super::caller::Role;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallerError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Profile for role {role} has no {field}")]
    MissingJurisdiction { role: Role, field: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeParseError {
    #[error("Missing scope parameter")]
    MissingScope,

    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("Missing id parameter for scope '{0}'")]
    MissingId(&'static str),

    #[error("Invalid id for scope '{scope}': {value}")]
    InvalidId { scope: &'static str, value: String },
}

impl ScopeParseError {
    /// Query parameter the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ScopeParseError::MissingScope | ScopeParseError::InvalidScope(_) => "scope",
            ScopeParseError::MissingId(_) | ScopeParseError::InvalidId { .. } => "id",
        }
    }
}
