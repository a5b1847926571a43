pub mod scope_service;

pub use scope_service::{
    authorize, authorize_issue, contractor_scope, require_admin, JurisdictionDirectory, ScopeError,
};
