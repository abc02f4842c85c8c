use axum::{
    Json,
    extract::{Path, State},
};
use teval_core::{ApiResponse, AppError, ErrorResponse, MessageResponse};
use teval_db::Store;
use teval_models::{TeacherDto, TeacherWithLevel};
use tracing::instrument;

use crate::modules::teachers::service::TeacherService;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/teachers",
    responses(
        (status = 200, description = "All teachers with their level", body = ApiResponse<Vec<TeacherWithLevel>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_teachers(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<TeacherWithLevel>>>, AppError> {
    let teachers = TeacherService::get_teachers(&store).await?;
    Ok(Json(ApiResponse::ok(teachers)))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(
        ("id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = ApiResponse<TeacherWithLevel>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_teacher(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TeacherWithLevel>>, AppError> {
    let teacher = TeacherService::get_teacher(&store, id).await?;
    Ok(Json(ApiResponse::ok(teacher)))
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = TeacherDto,
    responses(
        (status = 200, description = "Teacher created", body = ApiResponse<TeacherWithLevel>),
        (status = 400, description = "Invalid data or unknown level", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn create_teacher(
    State(store): State<Store>,
    ValidatedJson(dto): ValidatedJson<TeacherDto>,
) -> Result<Json<ApiResponse<TeacherWithLevel>>, AppError> {
    let teacher = TeacherService::create_teacher(&store, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Teacher created successfully",
        teacher,
    )))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(
        ("id" = i32, Path, description = "Teacher ID")
    ),
    request_body = TeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = ApiResponse<TeacherWithLevel>),
        (status = 400, description = "ID mismatch or unknown level", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn update_teacher(
    State(store): State<Store>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<TeacherDto>,
) -> Result<Json<ApiResponse<TeacherWithLevel>>, AppError> {
    let teacher = TeacherService::update_teacher(&store, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Teacher updated successfully",
        teacher,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(
        ("id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageResponse),
        (status = 400, description = "Teacher is still referenced", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_teacher(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    TeacherService::delete_teacher(&store, id).await?;
    Ok(Json(ApiResponse::message_only("Teacher deleted successfully")))
}
