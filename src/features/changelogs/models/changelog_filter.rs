use chrono::{DateTime, Utc};

/// Conditions a changelog must satisfy to be returned.
///
/// All present conditions are combined with AND. `published` and `deleted`
/// are fixed by [`ChangelogFilter::visible`]; optional conditions are added
/// through the `with_*` builders, which ignore absent or empty values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogFilter {
    pub published: bool,
    pub deleted: bool,
    /// At least one related category has exactly this name
    pub category: Option<String>,
    /// `published_at >= published_from`
    pub published_from: Option<DateTime<Utc>>,
    /// `published_at <= published_to`
    pub published_to: Option<DateTime<Utc>>,
    /// Full-text match against title OR summary
    pub search: Option<String>,
}

impl ChangelogFilter {
    /// Published and not soft-deleted
    pub fn visible() -> Self {
        Self {
            published: true,
            deleted: false,
            category: None,
            published_from: None,
            published_to: None,
            search: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.is_empty());
        self
    }

    pub fn with_published_from(mut self, from: Option<DateTime<Utc>>) -> Self {
        self.published_from = from;
        self
    }

    pub fn with_published_to(mut self, to: Option<DateTime<Utc>>) -> Self {
        self.published_to = to;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }
}

impl Default for ChangelogFilter {
    fn default() -> Self {
        Self::visible()
    }
}

/// Row window requested from the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangelogPage {
    pub limit: i64,
    pub offset: i64,
}
