use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_no_nul, validate_no_nul_items};

/// Name of the collection that stores playlists.
pub const PLAYLIST_COLLECTION: &str = "playlist";

/// An ordered, named list of videos.
///
/// `video_ids` are not checked against the video collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct Playlist {
    #[validate(length(min = 1), custom(function = "validate_no_nul"))]
    pub name: String,
    #[validate(custom(function = "validate_no_nul"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_no_nul_items"))]
    pub video_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaylistRecord {
    pub id: String,
    #[serde(flatten)]
    pub playlist: Playlist,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
