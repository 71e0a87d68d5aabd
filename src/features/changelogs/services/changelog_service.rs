use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::changelogs::dtos::{
    ChangelogListParams, ChangelogListResponseDto, ChangelogResponseDto,
};
use crate::features::changelogs::models::ChangelogRecord;
use crate::features::changelogs::repositories::ChangelogRepository;
use crate::modules::diagnostics::ErrorReporter;
use crate::shared::constants::MAX_SLUG_LENGTH;
use crate::shared::types::PaginationMeta;

/// Service for changelog retrieval
pub struct ChangelogService {
    repository: Arc<dyn ChangelogRepository>,
    reporter: Arc<dyn ErrorReporter>,
}

impl ChangelogService {
    pub fn new(
        repository: Arc<dyn ChangelogRepository>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            repository,
            reporter,
        }
    }

    /// List visible changelogs, newest first, with pagination metadata.
    ///
    /// Any persistence failure is reported once and surfaced as a generic
    /// `FetchFailed` so no internal detail reaches the caller.
    pub async fn list(&self, params: &ChangelogListParams) -> Result<ChangelogListResponseDto> {
        let (total, records) = self
            .fetch_page(params)
            .await
            .map_err(|e| self.report(e, "changelogs"))?;

        tracing::debug!(
            "Listed {} of {} changelogs (limit={}, offset={})",
            records.len(),
            total,
            params.limit,
            params.offset
        );

        Ok(ChangelogListResponseDto {
            data: records.into_iter().map(ChangelogResponseDto::from).collect(),
            pagination: PaginationMeta::new(params.limit, params.offset, total),
            query: params.applied_query(),
        })
    }

    /// Get a visible changelog by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<ChangelogResponseDto> {
        if slug.is_empty() || slug.chars().count() > MAX_SLUG_LENGTH {
            return Err(AppError::NotFound(format!("Changelog '{}' not found", slug)));
        }

        self.repository
            .find_by_slug(slug)
            .await
            .map_err(|e| self.report(e, "changelog"))?
            .map(ChangelogResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Changelog '{}' not found", slug)))
    }

    async fn fetch_page(&self, params: &ChangelogListParams) -> Result<(i64, Vec<ChangelogRecord>)> {
        let filter = params.filter();
        let total = self.repository.count(&filter).await?;
        let records = self.repository.find_many(&filter, params.page()).await?;
        Ok((total, records))
    }

    fn report(&self, error: AppError, resource: &'static str) -> AppError {
        self.reporter.capture_exception(&error);
        AppError::FetchFailed(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::changelogs::dtos::ChangelogListQuery;
    use crate::features::changelogs::models::{ChangelogFilter, ChangelogPage};
    use crate::shared::test_helpers::{
        fake_changelog, FakeChangelogRepository, RecordingReporter, RepositoryCall,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn service(
        repository: FakeChangelogRepository,
    ) -> (ChangelogService, Arc<FakeChangelogRepository>, Arc<RecordingReporter>) {
        let repository = Arc::new(repository);
        let reporter = Arc::new(RecordingReporter::default());
        let service = ChangelogService::new(repository.clone(), reporter.clone());
        (service, repository, reporter)
    }

    fn params(query: ChangelogListQuery) -> ChangelogListParams {
        query.into_params().unwrap()
    }

    #[tokio::test]
    async fn test_list_counts_then_fetches_with_same_filter() {
        let (service, repository, _) = service(FakeChangelogRepository::default());
        let p = params(ChangelogListQuery {
            category: Some("SDK".to_string()),
            ..Default::default()
        });

        service.list(&p).await.unwrap();

        let expected = ChangelogFilter::visible().with_category(Some("SDK".to_string()));
        assert_eq!(
            repository.calls().await,
            vec![
                RepositoryCall::Count(expected.clone()),
                RepositoryCall::FindMany(
                    expected,
                    ChangelogPage {
                        limit: 20,
                        offset: 0
                    }
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_returns_visible_rows_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut hidden = fake_changelog("hidden", base + Duration::days(5), &[]);
        hidden.published = false;
        let mut removed = fake_changelog("removed", base + Duration::days(4), &[]);
        removed.deleted = true;

        let (service, _, _) = service(FakeChangelogRepository::with_rows(vec![
            fake_changelog("older", base, &["SDK"]),
            hidden,
            fake_changelog("newer", base + Duration::days(2), &["SDK"]),
            removed,
        ]));

        let response = service.list(&params(ChangelogListQuery::default())).await.unwrap();
        let slugs: Vec<_> = response.data.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
        assert_eq!(response.pagination.total, 2);
        assert_eq!(response.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rows = (0..45)
            .map(|i| fake_changelog(&format!("entry-{}", i), base + Duration::days(i), &[]))
            .collect();
        let (service, _, _) = service(FakeChangelogRepository::with_rows(rows));

        let response = service
            .list(&params(ChangelogListQuery {
                page: Some("3".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();

        assert_eq!(response.data.len(), 5);
        assert_eq!(response.data[0].slug, "entry-4");
        assert_eq!(response.pagination.page, 3);
        assert_eq!(response.pagination.offset, 40);
        assert_eq!(response.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_failure_reports_once_and_hides_details() {
        let (service, _, reporter) =
            service(FakeChangelogRepository::failing("Database connection failed"));

        let err = service
            .list(&params(ChangelogListQuery::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::FetchFailed("changelogs")));
        assert_eq!(err.to_string(), "Failed to fetch changelogs");
        assert_eq!(reporter.count(), 1);
        assert!(reporter.captured()[0].contains("Database connection failed"));
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let mut draft = fake_changelog("draft", at, &[]);
        draft.published = false;
        let (service, _, _) = service(FakeChangelogRepository::with_rows(vec![
            fake_changelog("launch", at, &["SDK"]),
            draft,
        ]));

        let found = service.get_by_slug("launch").await.unwrap();
        assert_eq!(found.slug, "launch");
        assert_eq!(found.categories[0].name, "SDK");

        assert!(matches!(
            service.get_by_slug("draft").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.get_by_slug("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_by_slug_skips_query_for_oversized_slug() {
        let (service, repository, _) = service(FakeChangelogRepository::default());
        let slug = "s".repeat(MAX_SLUG_LENGTH + 1);

        assert!(matches!(
            service.get_by_slug(&slug).await,
            Err(AppError::NotFound(_))
        ));
        assert!(repository.calls().await.is_empty());
    }
}
