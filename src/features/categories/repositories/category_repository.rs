use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategorySummary;

/// Read access to categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by name
    async fn list(&self) -> Result<Vec<CategorySummary>>;
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> Result<Vec<CategorySummary>> {
        sqlx::query_as::<_, CategorySummary>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }
}
