use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_http_url, validate_no_nul, validate_no_nul_items};

/// Name of the collection that stores videos.
pub const VIDEO_COLLECTION: &str = "video";

pub const DEFAULT_SPEAKER: &str = "Premanand Maharaj";

fn default_speaker() -> String {
    DEFAULT_SPEAKER.to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
    Other,
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Platform::Youtube => write!(f, "youtube"),
            Platform::Instagram => write!(f, "instagram"),
            Platform::Other => write!(f, "other"),
        }
    }
}

/// A scripture passage cited in a video. Embedded in, and owned by, its video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct ScriptureRef {
    /// Name of the scripture, e.g. Bhagavad Gita, Srimad Bhagavatam
    #[validate(custom(function = "validate_no_nul"))]
    pub scripture: String,
    /// Chapter number/name if applicable
    #[validate(custom(function = "validate_no_nul"))]
    pub chapter: Option<String>,
    /// Verse or range, e.g. 2.47 or 1.2.10-12
    #[validate(custom(function = "validate_no_nul"))]
    pub verses: Option<String>,
    /// Quoted line or summary from the scripture
    #[validate(custom(function = "validate_no_nul"))]
    pub quote: Option<String>,
    #[validate(custom(function = "validate_no_nul"))]
    pub notes: Option<String>,
}

/// A video or reel in the catalog.
///
/// This is both the create payload and the stored document body. Optional fields are
/// stored as `null` so a fetched record always carries the full field set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct Video {
    #[validate(custom(function = "validate_no_nul"))]
    pub title: String,
    pub platform: Platform,
    /// YouTube video ID if platform is youtube
    #[validate(custom(function = "validate_no_nul"))]
    pub youtube_id: Option<String>,
    /// Full URL to the video/reel
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,
    #[validate(custom(function = "validate_http_url"))]
    pub thumbnail: Option<String>,
    /// Original publish date
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(custom(function = "validate_no_nul_items"))]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub scriptures: Vec<ScriptureRef>,
    #[serde(default = "default_speaker")]
    #[schema(default = "Premanand Maharaj")]
    #[validate(custom(function = "validate_no_nul"))]
    pub speaker: String,
    /// Primary language of discourse
    #[validate(custom(function = "validate_no_nul"))]
    pub language: Option<String>,
    #[validate(range(min = 0))]
    pub duration_seconds: Option<i64>,
}

/// A video as returned by the API: the stored document plus its identifier and
/// bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoRecord {
    pub id: String,
    #[serde(flatten)]
    pub video: Video,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_payload() -> serde_json::Value {
        json!({
            "title": "Naam Jap ki Mahima",
            "platform": "youtube",
            "url": "https://www.youtube.com/watch?v=abc123"
        })
    }

    #[test]
    fn test_defaults_applied_on_deserialize() {
        let video: Video = serde_json::from_value(minimal_payload()).unwrap();
        assert_eq!(video.speaker, DEFAULT_SPEAKER);
        assert!(video.tags.is_empty());
        assert!(video.scriptures.is_empty());
        assert!(video.published_at.is_none());
        assert!(video.validate().is_ok());
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let mut payload = minimal_payload();
        payload["platform"] = json!("tiktok");
        assert!(serde_json::from_value::<Video>(payload).is_err());
    }

    #[test]
    fn test_scripture_requires_name() {
        let mut payload = minimal_payload();
        payload["scriptures"] = json!([{ "chapter": "2" }]);
        assert!(serde_json::from_value::<Video>(payload).is_err());
    }

    #[test]
    fn test_invalid_urls_fail_validation() {
        let mut payload = minimal_payload();
        payload["url"] = json!("not a url");
        let video: Video = serde_json::from_value(payload).unwrap();
        assert!(video.validate().is_err());

        let mut payload = minimal_payload();
        payload["thumbnail"] = json!("ftp://example.com/thumb.jpg");
        let video: Video = serde_json::from_value(payload).unwrap();
        assert!(video.validate().is_err());
    }

    #[test]
    fn test_negative_duration_fails_validation() {
        let mut payload = minimal_payload();
        payload["duration_seconds"] = json!(-5);
        let video: Video = serde_json::from_value(payload).unwrap();
        assert!(video.validate().is_err());
    }

    #[test]
    fn test_serialized_document_keeps_null_fields() {
        let video: Video = serde_json::from_value(minimal_payload()).unwrap();
        let doc = serde_json::to_value(&video).unwrap();
        assert_eq!(doc["platform"], "youtube");
        assert!(doc.get("language").is_some_and(|v| v.is_null()));
        assert!(doc.get("duration_seconds").is_some_and(|v| v.is_null()));
    }

    #[test]
    fn test_nul_in_any_text_field_fails_validation() {
        let mut payload = minimal_payload();
        payload["title"] = json!("a\u{0}b");
        let video: Video = serde_json::from_value(payload).unwrap();
        assert!(video.validate().is_err());

        let mut payload = minimal_payload();
        payload["tags"] = json!(["naam", "jap\u{0}"]);
        let video: Video = serde_json::from_value(payload).unwrap();
        assert!(video.validate().is_err());

        let mut payload = minimal_payload();
        payload["scriptures"] = json!([{ "scripture": "Gita", "quote": "\u{0}" }]);
        let video: Video = serde_json::from_value(payload).unwrap();
        assert!(video.validate().is_err());
    }

    #[test]
    fn test_platform_display_matches_serde() {
        for platform in [Platform::Youtube, Platform::Instagram, Platform::Other] {
            let serialized = serde_json::to_value(platform).unwrap();
            assert_eq!(serialized, json!(platform.to_string()));
        }
    }
}
