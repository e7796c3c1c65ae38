pub mod diagnostics;
pub mod playlists;
pub mod videos;

use uuid::Uuid;
use vani_core::AppError;

/// Parse a document id from a path segment; malformed ids are a 400, not a 404.
pub(crate) fn parse_document_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vani_core::ErrorMetadata;

    #[test]
    fn test_parse_document_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_document_id(&id.to_string()).unwrap(), id);

        let err = parse_document_id("65a1f0c2e4b0a1b2c3d4e5f6").unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "Invalid ID");
    }
}
