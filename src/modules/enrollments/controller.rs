use axum::{
    Json,
    extract::{Path, State},
};
use teval_core::{ApiResponse, AppError, ErrorResponse, MessageResponse};
use teval_db::Store;
use teval_models::{CreateEnrollmentDto, EnrollmentDetails, UpdateEnrollmentDto};
use tracing::instrument;

use crate::modules::enrollments::service::EnrollmentService;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/enrollments",
    responses(
        (status = 200, description = "All enrollments with student, subject, and teacher names", body = ApiResponse<Vec<EnrollmentDetails>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_enrollments(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<EnrollmentDetails>>>, AppError> {
    let enrollments = EnrollmentService::get_enrollments(&store).await?;
    Ok(Json(ApiResponse::ok(enrollments)))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment details", body = ApiResponse<EnrollmentDetails>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_enrollment(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EnrollmentDetails>>, AppError> {
    let enrollment = EnrollmentService::get_enrollment(&store, id).await?;
    Ok(Json(ApiResponse::ok(enrollment)))
}

/// Enrolls a student in a list of subjects. Subjects that do not exist or
/// that the student already holds are skipped.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 200, description = "Enrollments created by this request (possibly none)", body = ApiResponse<Vec<EnrollmentDetails>>),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn create_enrollments(
    State(store): State<Store>,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<Json<ApiResponse<Vec<EnrollmentDetails>>>, AppError> {
    let created = EnrollmentService::create_enrollments(&store, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Enrollment(s) created successfully",
        created,
    )))
}

#[utoipa::path(
    put,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID")
    ),
    request_body = UpdateEnrollmentDto,
    responses(
        (status = 200, description = "Enrollment updated", body = ApiResponse<EnrollmentDetails>),
        (status = 400, description = "ID mismatch, duplicate pair, or unknown reference", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn update_enrollment(
    State(store): State<Store>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateEnrollmentDto>,
) -> Result<Json<ApiResponse<EnrollmentDetails>>, AppError> {
    let enrollment = EnrollmentService::update_enrollment(&store, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Enrollment updated successfully",
        enrollment,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_enrollment(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    EnrollmentService::delete_enrollment(&store, id).await?;
    Ok(Json(ApiResponse::message_only(
        "Enrollment deleted successfully",
    )))
}
