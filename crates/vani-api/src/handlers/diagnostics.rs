//! Service message, database diagnostics and static schema metadata.

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;
use vani_core::models::{PLAYLIST_COLLECTION, VIDEO_COLLECTION};

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const ERROR_PREVIEW_CHARS: usize = 50;
const MAX_LISTED_COLLECTIONS: i64 = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseDiagnostics {
    pub backend: String,
    /// `connected_and_working`, `connected_with_error: ..`, `error: ..` or `timeout`
    pub database: String,
    /// `set` when a connection string is configured
    pub database_url: String,
    pub database_name: Option<String>,
    pub connection_status: String,
    /// Up to 10 collection names
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SchemaResponse {
    pub collections: Vec<String>,
}

fn error_preview(err: impl Display) -> String {
    format!("{:#}", err).chars().take(ERROR_PREVIEW_CHARS).collect()
}

/// Run a check with a timeout, folding both failure modes into a short status string.
async fn run_check<T, E, F>(f: F) -> Result<T, String>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(CHECK_TIMEOUT, f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(error_preview(e)),
        Err(_) => Err("timeout".to_string()),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "diagnostics",
    responses((status = 200, description = "Service is running", body = MessageResponse))
)]
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Vani Media API is running".to_string(),
    })
}

/// Reports database connectivity. Always answers 200; failures are described in the body.
#[utoipa::path(
    get,
    path = "/test",
    tag = "diagnostics",
    responses((status = 200, description = "Database diagnostics", body = DatabaseDiagnostics))
)]
#[tracing::instrument(skip(state), fields(operation = "test_database"))]
pub async fn test_database(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let info = &state.db.info_repository;

    let mut response = DatabaseDiagnostics {
        backend: "running".to_string(),
        database: "not_available".to_string(),
        database_url: if state.config.database_url().is_empty() {
            "not_set".to_string()
        } else {
            "set".to_string()
        },
        database_name: None,
        connection_status: "not_connected".to_string(),
        collections: Vec::new(),
    };

    match run_check(info.database_name()).await {
        Ok(name) => {
            response.database_name = Some(name);
            response.connection_status = "connected".to_string();
            response.database = match run_check(info.collection_names(MAX_LISTED_COLLECTIONS))
                .await
            {
                Ok(collections) => {
                    response.collections = collections;
                    "connected_and_working".to_string()
                }
                Err(e) => format!("connected_with_error: {}", e),
            };
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database diagnostics failed");
            response.database = if e == "timeout" {
                e
            } else {
                format!("error: {}", e)
            };
        }
    }

    Json(response)
}

#[utoipa::path(
    get,
    path = "/schema",
    tag = "diagnostics",
    responses((status = 200, description = "Collections exposed by the API", body = SchemaResponse))
)]
pub async fn schema() -> impl IntoResponse {
    Json(SchemaResponse {
        collections: vec![
            VIDEO_COLLECTION.to_string(),
            PLAYLIST_COLLECTION.to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_preview_truncates() {
        let long = "x".repeat(200);
        assert_eq!(error_preview(&long).chars().count(), ERROR_PREVIEW_CHARS);
        assert_eq!(error_preview("short"), "short");
    }

    #[tokio::test]
    async fn test_run_check_maps_errors() {
        let ok: Result<u8, String> = run_check(async { Ok::<_, String>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u8, String> =
            run_check(async { Err::<u8, _>(anyhow::anyhow!("refused")) }).await;
        assert_eq!(err.unwrap_err(), "refused");
    }
}
