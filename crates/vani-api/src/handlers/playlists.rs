use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use validator::Validate;
use vani_core::models::{CreatedResponse, Playlist, PlaylistRecord};
use vani_core::AppError;
use vani_db::{normalize, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};

use super::parse_document_id;

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPlaylistsQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = MIN_LIMIT, max = MAX_LIMIT))]
    #[param(minimum = 1, maximum = 200, default = 50)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[utoipa::path(
    post,
    path = "/api/playlists",
    tag = "playlists",
    request_body = Playlist,
    responses(
        (status = 201, description = "Playlist created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, playlist), fields(operation = "create_playlist"))]
pub async fn create_playlist(
    State(state): State<Arc<AppState>>,
    ValidatedJson(playlist): ValidatedJson<Playlist>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = state
        .db
        .playlist_repository
        .create_playlist(&playlist)
        .await?;

    tracing::info!(playlist_id = %id, "Playlist created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/playlists",
    tag = "playlists",
    params(ListPlaylistsQuery),
    responses(
        (status = 200, description = "Playlists in natural order", body = Vec<PlaylistRecord>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, params), fields(limit = params.limit, operation = "list_playlists"))]
pub async fn list_playlists(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<ListPlaylistsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let playlists = state
        .db
        .playlist_repository
        .list_playlists(params.limit)
        .await?;

    let records: Vec<_> = playlists.into_iter().map(normalize).collect();
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/playlists/{id}",
    tag = "playlists",
    params(
        ("id" = String, Path, description = "Playlist ID")
    ),
    responses(
        (status = 200, description = "Playlist found", body = PlaylistRecord),
        (status = 400, description = "Malformed playlist ID", body = ErrorResponse),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(playlist_id = %id, operation = "get_playlist"))]
pub async fn get_playlist(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_document_id(&id)?;

    let playlist = state
        .db
        .playlist_repository
        .get_playlist(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    Ok(Json(normalize(playlist)))
}
