//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use vani_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vani Media API",
        version = "0.1.0",
        description = "Catalog of spiritual discourse videos, their scripture references, and playlists."
    ),
    paths(
        // Diagnostics
        handlers::diagnostics::root,
        handlers::diagnostics::test_database,
        handlers::diagnostics::schema,
        // Videos
        handlers::videos::create_video,
        handlers::videos::list_videos,
        handlers::videos::get_video,
        // Playlists
        handlers::playlists::create_playlist,
        handlers::playlists::list_playlists,
        handlers::playlists::get_playlist,
    ),
    components(
        schemas(
            models::Video,
            models::VideoRecord,
            models::ScriptureRef,
            models::Platform,
            models::Playlist,
            models::PlaylistRecord,
            models::CreatedResponse,
            handlers::diagnostics::MessageResponse,
            handlers::diagnostics::DatabaseDiagnostics,
            handlers::diagnostics::SchemaResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video catalog with scripture references and search"),
        (name = "playlists", description = "Named, ordered collections of videos"),
        (name = "diagnostics", description = "Liveness message, database diagnostics and schema metadata")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_catalog_paths() {
        let spec = ApiDoc::openapi();
        for path in [
            "/",
            "/test",
            "/schema",
            "/api/videos",
            "/api/videos/{id}",
            "/api/playlists",
            "/api/playlists/{id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_openapi_registers_video_schema() {
        let spec = ApiDoc::openapi();
        let schemas = &spec.components.expect("components").schemas;
        assert!(schemas.contains_key("Video"));
        assert!(schemas.contains_key("ScriptureRef"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
