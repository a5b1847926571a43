// handlers/mod.rs - Route handlers
//
// Public routes (/, /health) need nothing. Everything under /api/* runs behind
// jwt_auth_middleware and load_caller_middleware, so handlers receive a
// CurrentCaller and a Repository through request extensions.

pub mod auth;
pub mod dashboard;
pub mod issues;
pub mod public;
pub mod reports;
pub mod workers;

use uuid::Uuid;

use crate::access::{ScopeDimension, ScopeRequest};
use crate::error::ApiError;

/// Parse a jurisdiction id taken from the URL path into a scope request.
/// Malformed ids are validation errors, same as the `id` query parameter.
pub(crate) fn path_scope(dimension: ScopeDimension, raw: &str) -> Result<ScopeRequest, ApiError> {
    Ok(ScopeRequest::parse(Some(dimension.as_str()), Some(raw))?)
}

/// Parse an entity id taken from the URL path
pub(crate) fn path_id(field: &'static str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert(field.to_string(), format!("Invalid UUID format: {}", raw));
        ApiError::validation_error("Invalid path parameter", Some(field_errors))
    })
}
