pub mod caller;
pub mod error;
pub mod resolver;
pub mod scope;

pub use caller::{Caller, Role};
pub use error::{CallerError, ScopeParseError};
pub use resolver::{
    issue_visible, resolve, Decision, DenyReason, IssueJurisdiction, JurisdictionLookup, JurisdictionMap,
    NoHierarchy,
};
pub use scope::{ScopeDimension, ScopeFilter, ScopeRequest};
