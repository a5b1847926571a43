use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by the bearer tokens the dashboard accepts.
///
/// Tokens are issued by the identity provider; this service only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the `users` row
    pub sub: Uuid,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Informational only; the role stored on the profile row is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Invalid JWT token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Verify an HS256 token and return its claims. Expiry is enforced.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    // Provider tokens carry an audience we do not pin
    validation.validate_aud = false;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    Ok(token_data.claims)
}
