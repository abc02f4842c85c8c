use axum::{Router, routing::get};

use crate::modules::evaluations::controller::{get_evaluations, submit_evaluation};
use crate::state::AppState;

/// Listing is admin-only and submitting is student-only; the handlers check
/// roles through their extractors, so this router carries no route layer.
pub fn init_evaluations_router() -> Router<AppState> {
    Router::new().route("/", get(get_evaluations).post(submit_evaluation))
}
