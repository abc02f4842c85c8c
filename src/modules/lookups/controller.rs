use axum::{Json, extract::State};
use teval_core::{ApiResponse, AppError, ErrorResponse};
use teval_db::Store;
use teval_models::{CreateLevelDto, CreateSectionDto, Level, RoleRecord, Section};
use tracing::instrument;

use crate::modules::lookups::service::LookupService;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/levels",
    responses(
        (status = 200, description = "All levels", body = ApiResponse<Vec<Level>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Lookups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_levels(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<Level>>>, AppError> {
    let levels = LookupService::get_levels(&store).await?;
    Ok(Json(ApiResponse::ok(levels)))
}

#[utoipa::path(
    post,
    path = "/api/levels",
    request_body = CreateLevelDto,
    responses(
        (status = 200, description = "Level created", body = ApiResponse<Level>),
        (status = 400, description = "Missing or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Lookups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn create_level(
    State(store): State<Store>,
    ValidatedJson(dto): ValidatedJson<CreateLevelDto>,
) -> Result<Json<ApiResponse<Level>>, AppError> {
    let level = LookupService::create_level(&store, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Level created successfully",
        level,
    )))
}

#[utoipa::path(
    get,
    path = "/api/sections",
    responses(
        (status = 200, description = "All sections", body = ApiResponse<Vec<Section>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Lookups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_sections(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<Section>>>, AppError> {
    let sections = LookupService::get_sections(&store).await?;
    Ok(Json(ApiResponse::ok(sections)))
}

#[utoipa::path(
    post,
    path = "/api/sections",
    request_body = CreateSectionDto,
    responses(
        (status = 200, description = "Section created", body = ApiResponse<Section>),
        (status = 400, description = "Missing or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Lookups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn create_section(
    State(store): State<Store>,
    ValidatedJson(dto): ValidatedJson<CreateSectionDto>,
) -> Result<Json<ApiResponse<Section>>, AppError> {
    let section = LookupService::create_section(&store, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Section created successfully",
        section,
    )))
}

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "System roles", body = ApiResponse<Vec<RoleRecord>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Lookups",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_roles(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<RoleRecord>>>, AppError> {
    let roles = LookupService::get_roles(&store).await?;
    Ok(Json(ApiResponse::ok(roles)))
}
