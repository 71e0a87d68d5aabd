use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ErrorResponse, ListResponse};

/// List all categories
///
/// Returns every category as `{id, name}`, ordered by name.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ListResponse<CategoryResponseDto>),
        (status = 500, description = "Categories could not be loaded", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ListResponse<CategoryResponseDto>>> {
    let data = service.list().await?;
    Ok(Json(ListResponse { data }))
}
