use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::categories::models::CategorySummary;

/// Allowlisted projection of a changelog row with its categories.
///
/// Author, visibility flags and bookkeeping timestamps are never selected.
#[derive(Debug, Clone, FromRow)]
pub struct ChangelogRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub categories: Json<Vec<CategorySummary>>,
}
