use axum::{
    Json,
    extract::{Path, State},
};
use teval_core::{ApiResponse, AppError, ErrorResponse, MessageResponse};
use teval_db::Store;
use teval_models::{StudentDetails, StudentDto};
use tracing::instrument;

use crate::modules::students::service::StudentService;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students with level, section, and role names", body = ApiResponse<Vec<StudentDetails>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_students(
    State(store): State<Store>,
) -> Result<Json<ApiResponse<Vec<StudentDetails>>>, AppError> {
    let students = StudentService::get_students(&store).await?;
    Ok(Json(ApiResponse::with_message(
        "Students loaded successfully",
        students,
    )))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = ApiResponse<StudentDetails>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_student(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<StudentDetails>>, AppError> {
    let student = StudentService::get_student(&store, id).await?;
    Ok(Json(ApiResponse::with_message(
        "Student loaded successfully",
        student,
    )))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentDto,
    responses(
        (status = 200, description = "Student created", body = ApiResponse<StudentDetails>),
        (status = 400, description = "Invalid data, duplicate email, or unknown level", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_student(
    State(store): State<Store>,
    ValidatedJson(dto): ValidatedJson<StudentDto>,
) -> Result<Json<ApiResponse<StudentDetails>>, AppError> {
    let student = StudentService::create_student(&store, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Student created successfully",
        student,
    )))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    request_body = StudentDto,
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<StudentDetails>),
        (status = 400, description = "ID mismatch, duplicate email, or invalid data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_student(
    State(store): State<Store>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<StudentDto>,
) -> Result<Json<ApiResponse<StudentDetails>>, AppError> {
    let student = StudentService::update_student(&store, id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Student updated successfully",
        student,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 400, description = "Student has enrollments or evaluations", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_student(
    State(store): State<Store>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    StudentService::delete_student(&store, id).await?;
    Ok(Json(ApiResponse::message_only("Student deleted successfully")))
}
