use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::changelogs::models::{ChangelogFilter, ChangelogPage, ChangelogRecord};
use crate::shared::constants::SEARCH_CONFIG;

/// Read access to changelogs.
///
/// Implementations always order by `published_at` descending and project
/// rows to [`ChangelogRecord`].
#[async_trait]
pub trait ChangelogRepository: Send + Sync {
    /// Number of changelogs matching `filter`
    async fn count(&self, filter: &ChangelogFilter) -> Result<i64>;

    /// One window of changelogs matching `filter`, newest first
    async fn find_many(
        &self,
        filter: &ChangelogFilter,
        page: ChangelogPage,
    ) -> Result<Vec<ChangelogRecord>>;

    /// A published, non-deleted changelog by slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ChangelogRecord>>;
}

/// Columns exposed to callers plus categories aggregated as `[{id, name}]`
const SELECT_CHANGELOG: &str = r#"
    SELECT
        c.id, c.title, c.slug, c.summary, c.image, c.content, c.published_at,
        COALESCE(
            (
                SELECT json_agg(json_build_object('id', cat.id, 'name', cat.name) ORDER BY cat.name)
                FROM changelog_categories cc
                JOIN categories cat ON cat.id = cc.category_id
                WHERE cc.changelog_id = c.id
            ),
            '[]'::json
        ) AS categories
    FROM changelogs c
"#;

pub struct PgChangelogRepository {
    pool: PgPool,
}

impl PgChangelogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for `filter`, binding every user supplied value.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ChangelogFilter) {
    qb.push(" WHERE c.published = ")
        .push_bind(filter.published)
        .push(" AND c.deleted = ")
        .push_bind(filter.deleted);

    if let Some(category) = &filter.category {
        qb.push(
            " AND EXISTS (SELECT 1 FROM changelog_categories fc \
             JOIN categories fcat ON fcat.id = fc.category_id \
             WHERE fc.changelog_id = c.id AND fcat.name = ",
        )
        .push_bind(category.clone())
        .push(")");
    }

    if let Some(from) = filter.published_from {
        qb.push(" AND c.published_at >= ").push_bind(from);
    }

    if let Some(to) = filter.published_to {
        qb.push(" AND c.published_at <= ").push_bind(to);
    }

    if let Some(search) = &filter.search {
        qb.push(format!(
            " AND (to_tsvector('{0}', c.title) @@ plainto_tsquery('{0}', ",
            SEARCH_CONFIG
        ))
        .push_bind(search.clone())
        .push(format!(
            ") OR to_tsvector('{0}', COALESCE(c.summary, '')) @@ plainto_tsquery('{0}', ",
            SEARCH_CONFIG
        ))
        .push_bind(search.clone())
        .push("))");
    }
}

/// Visible rows matching `filter`, newest first; ties fall back to id so
/// pages stay stable.
fn find_many_query<'a>(
    filter: &ChangelogFilter,
    page: ChangelogPage,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_CHANGELOG);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY c.published_at DESC, c.id DESC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
    qb
}

#[async_trait]
impl ChangelogRepository for PgChangelogRepository {
    async fn count(&self, filter: &ChangelogFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM changelogs c");
        push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count changelogs: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_many(
        &self,
        filter: &ChangelogFilter,
        page: ChangelogPage,
    ) -> Result<Vec<ChangelogRecord>> {
        let mut qb = find_many_query(filter, page);

        qb.build_query_as::<ChangelogRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list changelogs: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ChangelogRecord>> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_CHANGELOG);
        push_filter(&mut qb, &ChangelogFilter::visible());
        qb.push(" AND c.slug = ").push_bind(slug.to_string());

        qb.build_query_as::<ChangelogRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get changelog by slug: {:?}", e);
                AppError::Database(e)
            })
    }
}
