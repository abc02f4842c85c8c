use axum::{Json, extract::State};
use teval_core::{ApiResponse, AppError, ErrorResponse};
use teval_db::Store;
use teval_models::{Evaluation, EvaluationDetails, SubmitEvaluationDto};
use tracing::instrument;

use crate::middleware::role::{RequireAdmin, RequireStudent};
use crate::modules::evaluations::service::EvaluationService;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/evaluations",
    responses(
        (status = 200, description = "All evaluations, newest first", body = ApiResponse<Vec<EvaluationDetails>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrators only", body = ErrorResponse)
    ),
    tag = "Evaluations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, _admin))]
pub async fn get_evaluations(
    State(store): State<Store>,
    _admin: RequireAdmin,
) -> Result<Json<ApiResponse<Vec<EvaluationDetails>>>, AppError> {
    let evaluations = EvaluationService::get_evaluations(&store).await?;
    Ok(Json(ApiResponse::ok(evaluations)))
}

#[utoipa::path(
    post,
    path = "/api/evaluations",
    request_body = SubmitEvaluationDto,
    responses(
        (status = 200, description = "Evaluation recorded", body = ApiResponse<Evaluation>),
        (status = 400, description = "Not enrolled with the teacher, or already evaluated", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse)
    ),
    tag = "Evaluations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, auth_user, dto), fields(email = %auth_user.email()))]
pub async fn submit_evaluation(
    State(store): State<Store>,
    RequireStudent(auth_user): RequireStudent,
    ValidatedJson(dto): ValidatedJson<SubmitEvaluationDto>,
) -> Result<Json<ApiResponse<Evaluation>>, AppError> {
    let student_id = auth_user.subject_id()?;
    let evaluation = EvaluationService::submit_evaluation(&store, student_id, dto).await?;
    Ok(Json(ApiResponse::with_message(
        "Evaluation submitted successfully",
        evaluation,
    )))
}
