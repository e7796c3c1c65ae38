//! Stored documents and their conversion into API records

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue};
use sqlx::types::Json;
use uuid::Uuid;

/// Key a document may carry for a store-internal identifier; never exposed.
pub const INTERNAL_ID_KEY: &str = "_id";

/// Key the external string identifier is published under.
pub const ID_KEY: &str = "id";

/// Timestamp fields that live inside the document body.
const DOCUMENT_TIMESTAMP_FIELDS: &[&str] = &["published_at"];

/// One row of a collection table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredDocument {
    pub id: Uuid,
    pub document: Json<Map<String, JsonValue>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn normalize_timestamp(value: &mut JsonValue) {
    if let JsonValue::String(text) = value {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            *text = format_timestamp(&parsed.with_timezone(&Utc));
        }
    }
}

/// Converts a stored document into a plain JSON record.
///
/// The identifier is published as a string under `id` and any internal `_id` key is dropped.
/// `created_at` / `updated_at` come from the row, and every timestamp is rendered as
/// RFC 3339 text. All other fields pass through unchanged.
pub fn normalize(stored: StoredDocument) -> Map<String, JsonValue> {
    let StoredDocument {
        id,
        document: Json(mut record),
        created_at,
        updated_at,
    } = stored;

    record.remove(INTERNAL_ID_KEY);
    record.insert(ID_KEY.to_string(), JsonValue::String(id.to_string()));

    for key in DOCUMENT_TIMESTAMP_FIELDS {
        if let Some(value) = record.get_mut(*key) {
            normalize_timestamp(value);
        }
    }

    record.insert(
        "created_at".to_string(),
        JsonValue::String(format_timestamp(&created_at)),
    );
    record.insert(
        "updated_at".to_string(),
        JsonValue::String(format_timestamp(&updated_at)),
    );

    record
}
