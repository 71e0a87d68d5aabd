mod changelog;
mod changelog_filter;

pub use changelog::ChangelogRecord;
pub use changelog_filter::{ChangelogFilter, ChangelogPage};
