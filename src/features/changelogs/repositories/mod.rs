mod changelog_repository;

pub use changelog_repository::{ChangelogRepository, PgChangelogRepository};
