use axum::{Json, extract::State};
use teval_core::{ApiResponse, AppError, ErrorResponse};
use teval_db::Store;
use teval_models::Dashboard;
use tracing::instrument;

use crate::middleware::auth::Identity;
use crate::modules::dashboard::service::DashboardService;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Aggregate counts for administrators, pending evaluations for students", body = ApiResponse<Dashboard>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse)
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, identity), fields(role = ?identity.role()))]
pub async fn get_dashboard(
    State(store): State<Store>,
    identity: Identity,
) -> Result<Json<ApiResponse<Dashboard>>, AppError> {
    let dashboard = DashboardService::get_dashboard(&store, &identity).await?;
    Ok(Json(ApiResponse::ok(dashboard)))
}
