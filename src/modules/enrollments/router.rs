use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::enrollments::controller::{
    create_enrollments, delete_enrollment, get_enrollment, get_enrollments, update_enrollment,
};
use crate::state::AppState;

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_enrollments).get(get_enrollments))
        .route(
            "/{id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
}
