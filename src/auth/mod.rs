//! Bearer-token authentication and role checks.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use serde::Serialize;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::domain::user::UserRole;

pub mod password;
pub mod token;

pub use password::{PasswordError, hash_password, verify_password};
pub use token::{Claims, decode_token, issue_token};

/// Identity attached to a request after its bearer token has been verified.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
}

/// Reasons a request fails authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Access denied. No token provided.")]
    MissingToken,
    #[error("Session expired. Please log in again.")]
    Expired,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("Authentication is not configured.")]
    Misconfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::Expired => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let Some(config) = req.app_data::<web::Data<AuthConfig>>() else {
        log::error!("AuthConfig missing from application data");
        return Err(AuthError::Misconfigured);
    };

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    decode_token(config.get_ref(), token)
}

fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .split_whitespace()
        .nth(1)
        .filter(|token| !token.is_empty())
}

/// Returns `true` when `role` is one of `allowed`.
pub fn check_role(role: UserRole, allowed: &[UserRole]) -> bool {
    allowed.contains(&role)
}
