use sqlx::PgPool;
use uuid::Uuid;
use vani_core::models::{Video, VIDEO_COLLECTION};
use vani_core::AppError;

use super::collection::Collection;
use super::document::StoredDocument;
use super::filter::VideoFilter;

/// Repository for the video collection
#[derive(Clone)]
pub struct VideoRepository {
    collection: Collection,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            collection: Collection::new(pool, VIDEO_COLLECTION),
        }
    }

    #[tracing::instrument(skip(self, video), fields(db.table = VIDEO_COLLECTION, db.operation = "insert", platform = %video.platform))]
    pub async fn create_video(&self, video: &Video) -> Result<Uuid, AppError> {
        let id = self.collection.insert(video).await?;
        tracing::debug!(video_id = %id, "Video inserted");
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = VIDEO_COLLECTION, db.operation = "select", db.record_id = %id))]
    pub async fn get_video(&self, id: Uuid) -> Result<Option<StoredDocument>, AppError> {
        self.collection.find_by_id(id).await
    }

    #[tracing::instrument(skip(self, filter), fields(db.table = VIDEO_COLLECTION, db.operation = "select", filter_count = filter.count(), limit = limit))]
    pub async fn list_videos(
        &self,
        filter: &VideoFilter,
        limit: i64,
    ) -> Result<Vec<StoredDocument>, AppError> {
        self.collection.find(filter, limit).await
    }
}
