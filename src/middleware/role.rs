//! Role-based authorization.
//!
//! Routers use the [`require_admin`] layer; handlers that serve a single
//! role take [`RequireAdmin`] or [`RequireStudent`] as an extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use teval_auth::Role;
use teval_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn ensure_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    if !auth_user.role().is_admin() {
        return Err(AppError::forbidden(
            "Access denied. Administrator privileges required.",
        ));
    }
    Ok(())
}

/// Route layer admitting Admin and Super Admin callers.
///
/// ```rust,ignore
/// let admin_routes = init_students_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let checked = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(auth_user) => ensure_admin(&auth_user),
        Err(e) => Err(e),
    };

    match checked {
        Ok(()) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => err.into_response(),
    }
}

#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&auth_user)?;
        Ok(RequireAdmin(auth_user))
    }
}

#[derive(Debug, Clone)]
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if auth_user.role() != Role::Student {
            return Err(AppError::forbidden(
                "Access denied. Only students can access this resource.",
            ));
        }

        Ok(RequireStudent(auth_user))
    }
}
