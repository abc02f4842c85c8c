use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::lookups::controller::{
    create_level, create_section, get_levels, get_roles, get_sections,
};
use crate::state::AppState;

/// Levels, sections, and roles. Merged at the API root rather than nested.
pub fn init_lookups_router() -> Router<AppState> {
    Router::new()
        .route("/levels", post(create_level).get(get_levels))
        .route("/sections", post(create_section).get(get_sections))
        .route("/roles", get(get_roles))
}
