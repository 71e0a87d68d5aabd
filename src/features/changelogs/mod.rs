//! Published changelog entries.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/changelogs` | Filtered, paginated listing, newest first |
//! | GET | `/api/changelogs/{slug}` | Single changelog by slug |
//!
//! Only entries with `published = true` and `deleted = false` are ever
//! returned. Listing parameters are untrusted strings; see
//! [`dtos::ChangelogListQuery`] for how each one is normalized.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{ChangelogRepository, PgChangelogRepository};
pub use services::ChangelogService;
