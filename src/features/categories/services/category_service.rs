use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::repositories::CategoryRepository;
use crate::modules::diagnostics::ErrorReporter;

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    reporter: Arc<dyn ErrorReporter>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            repository,
            reporter,
        }
    }

    /// List all categories (flat list, ordered by name)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        match self.repository.list().await {
            Ok(categories) => Ok(categories.into_iter().map(|c| c.into()).collect()),
            Err(e) => {
                self.reporter.capture_exception(&e);
                Err(AppError::FetchFailed("categories"))
            }
        }
    }
}
