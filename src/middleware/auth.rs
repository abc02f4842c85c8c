use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use teval_auth::{Claims, Role, verify_token};
use teval_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role()
    }

    /// The numeric account id from the subject claim.
    pub fn subject_id(&self) -> Result<i32, AppError> {
        self.0
            .subject_id()
            .ok_or_else(|| AppError::unauthorized("Invalid subject in token"))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// The caller as seen by role-dispatching handlers. A missing or invalid
/// token yields `Anonymous` instead of a rejection.
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Authenticated(Claims),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(claims) => Some(claims.role()),
        }
    }

    pub fn subject_id(&self) -> Option<i32> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(claims) => claims.subject_id(),
        }
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(match AuthUser::from_request_parts(parts, state).await {
            Ok(AuthUser(claims)) => Identity::Authenticated(claims),
            Err(_) => Identity::Anonymous,
        })
    }
}
