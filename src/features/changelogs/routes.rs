use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::changelogs::handlers;
use crate::features::changelogs::services::ChangelogService;

/// Create routes for the changelogs feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ChangelogService>) -> Router {
    Router::new()
        .route("/api/changelogs", get(handlers::list_changelogs))
        .route("/api/changelogs/{slug}", get(handlers::get_changelog))
        .with_state(service)
}
