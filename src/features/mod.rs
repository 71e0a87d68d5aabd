pub mod categories;
pub mod changelogs;
