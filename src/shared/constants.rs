/// Default page size for the changelog listing
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// QUERY INPUT LIMITS
// =============================================================================

/// Category filter values are cut to this many characters
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Search terms are cut to this many characters after sanitizing
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Slugs longer than this can never match a stored changelog
pub const MAX_SLUG_LENGTH: usize = 255;

/// Text search configuration used for title/summary matching
pub const SEARCH_CONFIG: &str = "english";
