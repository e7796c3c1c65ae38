use sqlx::PgPool;
use uuid::Uuid;
use vani_core::models::{Playlist, PLAYLIST_COLLECTION};
use vani_core::AppError;

use super::collection::{Collection, MatchAll};
use super::document::StoredDocument;

/// Repository for the playlist collection
#[derive(Clone)]
pub struct PlaylistRepository {
    collection: Collection,
}

impl PlaylistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            collection: Collection::new(pool, PLAYLIST_COLLECTION),
        }
    }

    #[tracing::instrument(skip(self, playlist), fields(db.table = PLAYLIST_COLLECTION, db.operation = "insert", video_count = playlist.video_ids.len()))]
    pub async fn create_playlist(&self, playlist: &Playlist) -> Result<Uuid, AppError> {
        self.collection.insert(playlist).await
    }

    #[tracing::instrument(skip(self), fields(db.table = PLAYLIST_COLLECTION, db.operation = "select", db.record_id = %id))]
    pub async fn get_playlist(&self, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        self.collection.find_by_id(id).await
    }

    #[tracing::instrument(skip(self), fields(db.table = PLAYLIST_COLLECTION, db.operation = "select"))]
    pub async fn list_playlists(&self, limit: i64) -> Result<Vec<StoredDocument>, AppError> {
        self.collection.find(&MatchAll, limit).await
    }
}
