//! Test fixtures: request payloads and seeding helpers.

use axum_test::TestServer;
use serde_json::{json, Value};

/// Minimal valid video payload.
pub fn video_payload(title: &str) -> Value {
    json!({
        "title": title,
        "platform": "youtube",
        "url": "https://www.youtube.com/watch?v=abc123",
    })
}

/// Video payload with tags and scripture references.
pub fn annotated_video(
    title: &str,
    platform: &str,
    tags: &[&str],
    scriptures: &[&str],
) -> Value {
    let refs: Vec<Value> = scriptures
        .iter()
        .map(|name| json!({ "scripture": name, "verses": "2.47" }))
        .collect();
    json!({
        "title": title,
        "platform": platform,
        "url": "https://example.org/videos/1",
        "tags": tags,
        "scriptures": refs,
    })
}

/// Create a video through the API and return its id.
pub async fn create_video(client: &TestServer, payload: &Value) -> String {
    let response = client.post("/api/videos").json(payload).await;
    assert_eq!(response.status_code(), 201, "create failed: {}", response.text());
    let body: Value = response.json();
    body["id"]
        .as_str()
        .expect("created response carries an id")
        .to_string()
}

/// Titles of a list response, in order.
pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("list response is an array")
        .iter()
        .map(|v| v["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
