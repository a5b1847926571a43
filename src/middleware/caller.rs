use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::access::Caller;
use crate::database::models::UserProfile;
use crate::database::{DatabaseManager, Repository};
use crate::error::ApiError;

/// Profile and resolved caller for the authenticated user
#[derive(Clone, Debug)]
pub struct CurrentCaller {
    pub profile: UserProfile,
    pub caller: Caller,
}

/// Loads the `users` row named by the token and builds the `Caller`.
///
/// Must run after `jwt_auth_middleware`. Also injects the `Repository` used by
/// the handlers.
pub async fn load_caller_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before caller lookup"))?;

    let repository = Repository::new(DatabaseManager::pool().await?);

    let profile = repository.find_profile(auth_user.user_id).await?.ok_or_else(|| {
        tracing::warn!("No profile for authenticated user {}", auth_user.user_id);
        ApiError::not_found("User not found")
    })?;

    let caller = profile.caller()?;

    if let Some(claimed) = auth_user.claimed_role.as_deref() {
        if claimed != caller.role().as_str() {
            tracing::debug!(
                "Token role '{}' differs from profile role '{}' for {}",
                claimed,
                caller.role(),
                profile.id
            );
        }
    }

    tracing::debug!("Caller loaded: {} as {}", profile.display_name(), caller.role());

    request.extensions_mut().insert(CurrentCaller { profile, caller });
    request.extensions_mut().insert(repository);

    Ok(next.run(request).await)
}
