use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthenticatedUser};
use crate::config::AuthConfig;
use crate::domain::user::{User, UserRole};

/// Claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iat: now,
            exp: now + ttl_secs,
        }
    }
}

/// Sign a fresh token for `user`.
pub fn issue_token(config: &AuthConfig, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::for_user(user, config.token_ttl_secs);
    encode_claims(config, &claims)
}

pub fn encode_claims(
    config: &AuthConfig,
    claims: &Claims,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Verify the signature and expiry of `token` and return the identity it carries.
pub fn decode_token(config: &AuthConfig, token: &str) -> Result<AuthenticatedUser, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => {
            log::warn!("Token verification failed: {err}");
            AuthError::InvalidToken
        }
    })?;

    let claims = data.claims;
    let id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| AuthError::InvalidToken)?;
    let role = claims
        .role
        .parse::<UserRole>()
        .map_err(|_| AuthError::InvalidToken)?;

    Ok(AuthenticatedUser {
        id,
        email: claims.email,
        role,
        exp: claims.exp,
    })
}
