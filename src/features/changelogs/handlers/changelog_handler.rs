use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::changelogs::dtos::{
    ChangelogListQuery, ChangelogListResponseDto, ChangelogResponseDto,
};
use crate::features::changelogs::services::ChangelogService;
use crate::shared::types::ErrorResponse;

/// List published changelogs
///
/// Filters by category, publish date range and full-text search; always
/// ordered by publish date, newest first.
#[utoipa::path(
    get,
    path = "/api/changelogs",
    params(ChangelogListQuery),
    responses(
        (status = 200, description = "Page of changelogs", body = ChangelogListResponseDto),
        (status = 400, description = "Invalid date parameter", body = ErrorResponse),
        (status = 500, description = "Changelogs could not be loaded", body = ErrorResponse),
    ),
    tag = "changelogs"
)]
pub async fn list_changelogs(
    State(service): State<Arc<ChangelogService>>,
    AppQuery(pairs): AppQuery<Vec<(String, String)>>,
) -> Result<Json<ChangelogListResponseDto>> {
    let params = ChangelogListQuery::from_pairs(pairs).into_params()?;
    let response = service.list(&params).await?;
    Ok(Json(response))
}

/// Get a published changelog by slug
#[utoipa::path(
    get,
    path = "/api/changelogs/{slug}",
    params(
        ("slug" = String, Path, description = "Changelog slug")
    ),
    responses(
        (status = 200, description = "Changelog found", body = ChangelogResponseDto),
        (status = 404, description = "Changelog not found", body = ErrorResponse),
        (status = 500, description = "Changelog could not be loaded", body = ErrorResponse),
    ),
    tag = "changelogs"
)]
pub async fn get_changelog(
    State(service): State<Arc<ChangelogService>>,
    Path(slug): Path<String>,
) -> Result<Json<ChangelogResponseDto>> {
    let changelog = service.get_by_slug(&slug).await?;
    Ok(Json(changelog))
}
