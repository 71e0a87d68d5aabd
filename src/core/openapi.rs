use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::changelogs::{dtos as changelogs_dtos, handlers as changelogs_handlers};
use crate::shared::types::{ErrorResponse, ListResponse, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Changelogs (public)
        changelogs_handlers::list_changelogs,
        changelogs_handlers::get_changelog,
        // Categories (public)
        categories_handlers::list_categories,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            PaginationMeta,
            // Changelogs
            changelogs_dtos::ChangelogResponseDto,
            changelogs_dtos::ChangelogListResponseDto,
            changelogs_dtos::AppliedQueryDto,
            // Categories
            categories_dtos::CategoryResponseDto,
            ListResponse<categories_dtos::CategoryResponseDto>,
        )
    ),
    tags(
        (name = "changelogs", description = "Published changelog entries (public)"),
        (name = "categories", description = "Changelog categories (public)"),
    ),
    info(
        title = "Changelog API",
        version = "0.1.0",
        description = "Read-only API for published changelog entries",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_public_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/changelogs"));
        assert!(doc.paths.paths.contains_key("/api/changelogs/{slug}"));
        assert!(doc.paths.paths.contains_key("/api/categories"));
    }

    #[test]
    fn test_info_modifier_overrides_defaults() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Docs".to_string(),
            version: "9.9.9".to_string(),
            description: "custom".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Docs");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("custom"));
    }
}
