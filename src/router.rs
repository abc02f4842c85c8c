use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use teval_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::middleware::role::require_admin;
use crate::modules::auth::init_auth_router;
use crate::modules::dashboard::init_dashboard_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::evaluations::init_evaluations_router;
use crate::modules::lookups::init_lookups_router;
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::teachers::init_teachers_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let admin = || middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route(
            "/api-docs/openapi.json",
            axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/dashboard", init_dashboard_router())
                .nest("/evaluations", init_evaluations_router())
                .nest("/students", init_students_router().route_layer(admin()))
                .nest("/enrollments", init_enrollments_router().route_layer(admin()))
                .nest("/teachers", init_teachers_router().route_layer(admin()))
                .nest("/subjects", init_subjects_router().route_layer(admin()))
                .merge(init_lookups_router().route_layer(admin())),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
