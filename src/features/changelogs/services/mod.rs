mod changelog_service;

pub use changelog_service::ChangelogService;
