//! Categories used to tag changelog entries.
//!
//! Public, read-only. Clients use the listing to build the category filter
//! for `/api/changelogs`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
