#![cfg(test)]

use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use sqlx::types::Json;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategorySummary;
use crate::features::categories::CategoryRepository;
use crate::features::changelogs::models::{ChangelogFilter, ChangelogPage, ChangelogRecord};
use crate::features::changelogs::ChangelogRepository;
use crate::modules::diagnostics::ErrorReporter;

/// A changelog row as stored, including columns never exposed
#[derive(Debug, Clone)]
pub struct StoredChangelog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub published: bool,
    pub deleted: bool,
    pub author_id: Option<Uuid>,
    pub categories: Vec<CategorySummary>,
}

impl StoredChangelog {
    fn matches(&self, filter: &ChangelogFilter) -> bool {
        let contains = |text: &str, term: &str| text.to_lowercase().contains(&term.to_lowercase());

        self.published == filter.published
            && self.deleted == filter.deleted
            && filter
                .category
                .as_ref()
                .is_none_or(|name| self.categories.iter().any(|c| &c.name == name))
            && filter
                .published_from
                .is_none_or(|from| self.published_at >= from)
            && filter.published_to.is_none_or(|to| self.published_at <= to)
            && filter.search.as_ref().is_none_or(|term| {
                contains(&self.title, term)
                    || self.summary.as_deref().is_some_and(|s| contains(s, term))
            })
    }

    fn to_record(&self) -> ChangelogRecord {
        ChangelogRecord {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            summary: self.summary.clone(),
            image: self.image.clone(),
            content: self.content.clone(),
            published_at: self.published_at,
            categories: Json(self.categories.clone()),
        }
    }
}

/// Published, non-deleted changelog with generated text
pub fn fake_changelog(slug: &str, published_at: DateTime<Utc>, categories: &[&str]) -> StoredChangelog {
    StoredChangelog {
        id: Uuid::new_v4(),
        title: Sentence(3..6).fake(),
        slug: slug.to_string(),
        summary: Some(Sentence(6..12).fake()),
        image: Some(format!("https://example.com/{}.png", slug)),
        content: Paragraph(2..4).fake(),
        published_at,
        published: true,
        deleted: false,
        author_id: Some(Uuid::new_v4()),
        categories: categories
            .iter()
            .map(|name| CategorySummary {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryCall {
    Count(ChangelogFilter),
    FindMany(ChangelogFilter, ChangelogPage),
    FindBySlug(String),
}

/// In-memory changelog store that records every call it receives
#[derive(Default)]
pub struct FakeChangelogRepository {
    pub rows: Vec<StoredChangelog>,
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<RepositoryCall>>,
}

impl FakeChangelogRepository {
    pub fn with_rows(rows: Vec<StoredChangelog>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Every query fails with a database protocol error carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub async fn calls(&self) -> Vec<RepositoryCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: RepositoryCall) -> Result<()> {
        self.calls.lock().await.push(call);
        match &self.fail_with {
            Some(message) => Err(AppError::Database(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }

    fn visible_sorted(&self, filter: &ChangelogFilter) -> Vec<&StoredChangelog> {
        let mut rows: Vec<_> = self.rows.iter().filter(|r| r.matches(filter)).collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl ChangelogRepository for FakeChangelogRepository {
    async fn count(&self, filter: &ChangelogFilter) -> Result<i64> {
        self.record(RepositoryCall::Count(filter.clone())).await?;
        Ok(self.visible_sorted(filter).len() as i64)
    }

    async fn find_many(
        &self,
        filter: &ChangelogFilter,
        page: ChangelogPage,
    ) -> Result<Vec<ChangelogRecord>> {
        self.record(RepositoryCall::FindMany(filter.clone(), page))
            .await?;
        Ok(self
            .visible_sorted(filter)
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(StoredChangelog::to_record)
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ChangelogRecord>> {
        self.record(RepositoryCall::FindBySlug(slug.to_string()))
            .await?;
        Ok(self
            .visible_sorted(&ChangelogFilter::visible())
            .into_iter()
            .find(|r| r.slug == slug)
            .map(StoredChangelog::to_record))
    }
}

#[derive(Default)]
pub struct FakeCategoryRepository {
    pub categories: Vec<CategorySummary>,
    pub fail_with: Option<String>,
}

impl FakeCategoryRepository {
    pub fn with_categories(categories: Vec<CategorySummary>) -> Self {
        Self {
            categories,
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            categories: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl CategoryRepository for FakeCategoryRepository {
    async fn list(&self) -> Result<Vec<CategorySummary>> {
        if let Some(message) = &self.fail_with {
            return Err(AppError::Database(sqlx::Error::Protocol(message.clone())));
        }
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

/// Keeps the display text of every captured error
#[derive(Default)]
pub struct RecordingReporter {
    captured: StdMutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn captured(&self) -> Vec<String> {
        self.captured.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

impl ErrorReporter for RecordingReporter {
    fn capture_exception(&self, error: &AppError) {
        self.captured.lock().unwrap().push(error.to_string());
    }
}
