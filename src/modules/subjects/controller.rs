use axum::{
    Json,
    extract::{Path, State},
};
use teval_core::{ApiResponse, AppError, ErrorResponse, MessageResponse};
use teval_db::Store;
use teval_models::{SubjectDetails, SubjectDto};
use tracing::instrument;

use crate::modules::subjects::service::SubjectService;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "All subjects with teacher names", body = ApiResponse<Vec<SubjectDetails>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_subjects(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<SubjectDetails>>>, AppError> {
    let subjects = SubjectService::get_subjects(&store).await?;
    Ok(Json(ApiResponse::ok(subjects)))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject details", body = ApiResponse<SubjectDetails>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_subject(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SubjectDetails>>, AppError> {
    let subject = SubjectService::get_subject(&store, id).await?;
    Ok(Json(ApiResponse::ok(subject)))
}

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = SubjectDto,
    responses(
        (status = 200, description = "Subject created", body = ApiResponse<SubjectDetails>),
        (status = 400, description = "Invalid data or unknown teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn create_subject(
    State(store): State<Store>,
    ValidatedJson(dto): ValidatedJson<SubjectDto>,
) -> Result<Json<ApiResponse<SubjectDetails>>, AppError> {
    let subject = SubjectService::create_subject(&store, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Subject created successfully",
        subject,
    )))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    request_body = SubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = ApiResponse<SubjectDetails>),
        (status = 400, description = "ID mismatch or unknown teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn update_subject(
    State(store): State<Store>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<SubjectDto>,
) -> Result<Json<ApiResponse<SubjectDetails>>, AppError> {
    let subject = SubjectService::update_subject(&store, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Subject updated successfully",
        subject,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject deleted", body = MessageResponse),
        (status = 400, description = "Subject has enrollments", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_subject(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    SubjectService::delete_subject(&store, id).await?;
    Ok(Json(ApiResponse::message_only("Subject deleted successfully")))
}
