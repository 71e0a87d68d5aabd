use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::changelogs::models::{ChangelogFilter, ChangelogPage, ChangelogRecord};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_CATEGORY_LENGTH, MAX_PAGE_SIZE};
use crate::shared::types::PaginationMeta;
use crate::shared::validation::{parse_date, parse_number, sanitize_search, truncate_chars};

// =============================================================================
// REQUEST
// =============================================================================

/// Raw query parameters for listing changelogs.
///
/// Everything arrives as an untrusted string; call [`ChangelogListQuery::into_params`]
/// to validate and normalize.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChangelogListQuery {
    /// Exact category name (truncated to 100 characters)
    pub category: Option<String>,

    /// Only entries published at or after this date
    pub from: Option<String>,

    /// Alias of `from`
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,

    /// Only entries published at or before this date
    pub to: Option<String>,

    /// Alias of `to`
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,

    /// Full-text search over title and summary
    pub search: Option<String>,

    /// Page size (default: 20, clamped to 1..=100)
    pub limit: Option<String>,

    /// Zero-based row offset; takes precedence over `page`
    pub offset: Option<String>,

    /// One-based page number, used when `offset` is absent
    pub page: Option<String>,
}

/// Pick the first non-empty value of a parameter and its aliases,
/// returning the name it arrived under.
fn first_present<'a>(
    candidates: [(&'static str, &'a Option<String>); 2],
) -> Option<(&'static str, &'a str)> {
    candidates.into_iter().find_map(|(name, value)| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| (name, v))
    })
}

fn parse_date_param(
    candidates: [(&'static str, &Option<String>); 2],
) -> Result<Option<DateTime<Utc>>> {
    match first_present(candidates) {
        None => Ok(None),
        Some((name, raw)) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid '{}' date format", name))),
    }
}

impl ChangelogListQuery {
    /// Collect decoded query pairs, keeping the first value of a repeated
    /// key. Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut query.category,
                "from" => &mut query.from,
                "startDate" => &mut query.start_date,
                "to" => &mut query.to,
                "endDate" => &mut query.end_date,
                "search" => &mut query.search,
                "limit" => &mut query.limit,
                "offset" => &mut query.offset,
                "page" => &mut query.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Validate dates and normalize every other parameter.
    ///
    /// Fails only on an unparseable date; numeric and text parameters are
    /// always coerced into range.
    pub fn into_params(self) -> Result<ChangelogListParams> {
        let from = parse_date_param([("from", &self.from), ("startDate", &self.start_date)])?;
        let to = parse_date_param([("to", &self.to), ("endDate", &self.end_date)])?;

        let category = self
            .category
            .as_deref()
            .map(|c| truncate_chars(c, MAX_CATEGORY_LENGTH).to_string())
            .filter(|c| !c.is_empty());

        let search = self
            .search
            .as_deref()
            .map(sanitize_search)
            .filter(|s| !s.is_empty());

        let limit = match parse_number(self.limit.as_deref()) {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(n) => n.clamp(1, MAX_PAGE_SIZE),
        };

        let offset = match parse_number(self.offset.as_deref()) {
            Some(n) => n.max(0),
            None => match parse_number(self.page.as_deref()) {
                Some(page) => (page.max(1) - 1).saturating_mul(limit),
                None => 0,
            },
        };

        Ok(ChangelogListParams {
            category,
            from,
            to,
            search,
            limit,
            offset,
        })
    }
}

/// Validated, normalized listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogListParams {
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ChangelogListParams {
    pub fn filter(&self) -> ChangelogFilter {
        ChangelogFilter::visible()
            .with_category(self.category.clone())
            .with_published_from(self.from)
            .with_published_to(self.to)
            .with_search(self.search.clone())
    }

    pub fn page(&self) -> ChangelogPage {
        ChangelogPage {
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn applied_query(&self) -> AppliedQueryDto {
        AppliedQueryDto {
            category: self.category.clone(),
            from: self.from,
            to: self.to,
            search: self.search.clone(),
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// A published changelog entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogResponseDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub categories: Vec<CategoryResponseDto>,
}

impl From<ChangelogRecord> for ChangelogResponseDto {
    fn from(r: ChangelogRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            slug: r.slug,
            summary: r.summary,
            image: r.image,
            content: r.content,
            published_at: r.published_at,
            categories: r.categories.0.into_iter().map(Into::into).collect(),
        }
    }
}

/// Filters that were applied, after normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppliedQueryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Paginated changelog listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChangelogListResponseDto {
    pub data: Vec<ChangelogResponseDto>,
    pub pagination: PaginationMeta,
    pub query: AppliedQueryDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn query() -> ChangelogListQuery {
        ChangelogListQuery::default()
    }

    fn params(q: ChangelogListQuery) -> ChangelogListParams {
        q.into_params().unwrap()
    }

    fn pairs(raw: &[(&str, &str)]) -> ChangelogListQuery {
        ChangelogListQuery::from_pairs(
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_from_pairs_keeps_first_value() {
        let q = pairs(&[
            ("limit", "10"),
            ("limit", "20"),
            ("category", "SDK"),
            ("category", "API"),
            ("startDate", "2024-01-01"),
            ("utm_source", "mail"),
        ]);
        assert_eq!(q.limit.as_deref(), Some("10"));
        assert_eq!(q.category.as_deref(), Some("SDK"));
        assert_eq!(q.start_date.as_deref(), Some("2024-01-01"));

        let p = params(q);
        assert_eq!(p.limit, 10);
        assert_eq!(p.category.as_deref(), Some("SDK"));
    }

    #[test]
    fn test_huge_offset_is_kept() {
        let p = params(pairs(&[("offset", "9223372036854775807"), ("limit", "1")]));
        assert_eq!(p.offset, i64::MAX);
        assert_eq!(p.limit, 1);
    }

    #[test]
    fn test_defaults() {
        let p = params(query());
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
        assert_eq!(p.category, None);
        assert_eq!(p.search, None);
        assert_eq!(p.filter(), ChangelogFilter::visible());
    }

    #[test]
    fn test_limit_clamping() {
        let cases = [("50", 50), ("500", 100), ("-5", 1), ("0", 20), ("abc", 20), ("", 20)];
        for (raw, expected) in cases {
            let p = params(ChangelogListQuery {
                limit: Some(raw.to_string()),
                ..query()
            });
            assert_eq!(p.limit, expected, "limit={}", raw);
        }
    }

    #[test]
    fn test_offset_clamping() {
        let p = params(ChangelogListQuery {
            offset: Some("-10".to_string()),
            ..query()
        });
        assert_eq!(p.offset, 0);

        let p = params(ChangelogListQuery {
            offset: Some("20".to_string()),
            ..query()
        });
        assert_eq!(p.offset, 20);
    }

    #[test]
    fn test_page_converts_to_offset() {
        let p = params(ChangelogListQuery {
            page: Some("3".to_string()),
            limit: Some("10".to_string()),
            ..query()
        });
        assert_eq!(p.offset, 20);

        let p = params(ChangelogListQuery {
            page: Some("0".to_string()),
            ..query()
        });
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_offset_wins_over_page() {
        let p = params(ChangelogListQuery {
            page: Some("5".to_string()),
            offset: Some("7".to_string()),
            ..query()
        });
        assert_eq!(p.offset, 7);
    }

    #[test]
    fn test_category_truncated() {
        let p = params(ChangelogListQuery {
            category: Some("a".repeat(200)),
            ..query()
        });
        assert_eq!(p.category, Some("a".repeat(100)));
    }

    #[test]
    fn test_search_sanitized() {
        let p = params(ChangelogListQuery {
            search: Some("test&|!:*".to_string()),
            ..query()
        });
        assert_eq!(p.search.as_deref(), Some("test"));

        let p = params(ChangelogListQuery {
            search: Some("***".to_string()),
            ..query()
        });
        assert_eq!(p.search, None);
    }

    #[test]
    fn test_date_range() {
        let p = params(ChangelogListQuery {
            from: Some("2024-01-01".to_string()),
            to: Some("2024-12-31".to_string()),
            ..query()
        });
        let filter = p.filter();
        assert_eq!(
            filter.published_from,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            filter.published_to,
            Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_date_aliases() {
        let p = params(ChangelogListQuery {
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-31".to_string()),
            ..query()
        });
        assert!(p.from.is_some());
        assert!(p.to.is_some());
    }

    #[test]
    fn test_invalid_dates_name_the_parameter() {
        let err = ChangelogListQuery {
            from: Some("invalid".to_string()),
            ..query()
        }
        .into_params()
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid 'from' date format");

        let err = ChangelogListQuery {
            to: Some("not-a-date".to_string()),
            ..query()
        }
        .into_params()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid 'to' date format"));

        let err = ChangelogListQuery {
            start_date: Some("yesterday".to_string()),
            ..query()
        }
        .into_params()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid 'startDate' date format"));
    }

    #[test]
    fn test_applied_query_omits_absent_filters() {
        let p = params(ChangelogListQuery {
            category: Some("SDK".to_string()),
            ..query()
        });
        let value = serde_json::to_value(p.applied_query()).unwrap();
        assert_eq!(value, serde_json::json!({ "category": "SDK" }));
    }
}
