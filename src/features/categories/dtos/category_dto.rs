use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::CategorySummary;

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
}

impl From<CategorySummary> for CategoryResponseDto {
    fn from(c: CategorySummary) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}
