use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Wrapper for plain list endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination metadata attached to paginated list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-indexed), derived from offset and limit
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
    /// Total rows matching the filter
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(limit: i64, offset: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let offset = offset.max(0);
        Self {
            page: (offset / limit).saturating_add(1),
            limit,
            offset,
            total,
            total_pages: total.max(0).saturating_add(limit - 1) / limit,
        }
    }
}
