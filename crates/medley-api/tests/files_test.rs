//! Listing, search, and delete integration tests.
//!
//! Run with: `cargo test -p medley-api --test files_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use helpers::setup_test_app;
use medley_core::models::MetadataRecord;
use serde_json::Value;

async fn upload(client: &TestServer, name: &str, mime: &'static str, data: Vec<u8>) -> String {
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(data).file_name(name.to_string()).mime_type(mime),
    );
    let response = client.post("/upload").multipart(form).await;
    assert_eq!(response.status_code(), 200, "upload of {} failed", name);
    let body: Value = response.json();
    body["file"]["fileName"].as_str().expect("fileName").to_string()
}

fn tagged_record(file_name: &str, tags: &[&str]) -> MetadataRecord {
    MetadataRecord {
        file_name: Some(file_name.to_string()),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_list_shows_uploaded_file_without_metadata() {
    let app = setup_test_app().await;
    let key = upload(app.client(), "photo.png", "image/png", vec![1, 2, 3]).await;

    let response = app.client().get("/files").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["total"], 1);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["offset"], 0);

    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);

    let file = &files[0];
    assert_eq!(file["id"], key.as_str());
    assert_eq!(file["fileName"], key.as_str());
    assert_eq!(file["name"], "photo.png");
    assert_eq!(file["size"], 3);
    assert_eq!(file["contentType"], "image/png");
    assert_eq!(file["fileType"], "image");
    assert_eq!(file["status"], "uploaded");
    assert_eq!(file["hasMetadata"], Value::Bool(false));
    assert!(file["createdAt"].is_string());
    assert!(file["downloadUrl"].as_str().unwrap().contains("?expires="));
    // Image previews reuse the signed link.
    assert_eq!(file["previewUrl"], file["downloadUrl"]);
    // Key must be absent entirely, not null.
    assert!(file.get("aiAnalysis").is_none());
}

#[tokio::test]
async fn test_listing_classifies_by_content_type_not_extension() {
    let app = setup_test_app().await;
    // Extension says image (which is what upload validation checks), content
    // type says video (which is what listings report).
    let response = app
        .client()
        .post("/upload")
        .multipart(MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![1])
                .file_name("clip.png".to_string())
                .mime_type("video/mp4"),
        ))
        .await;
    assert_eq!(response.status_code(), 200);
    let upload_body: Value = response.json();
    assert_eq!(upload_body["file"]["fileType"], "image");

    let body: Value = app.client().get("/files").await.json();
    let file = &body["files"][0];
    assert_eq!(file["fileType"], "video");
    assert_eq!(file["previewUrl"], "/video-thumbnail.jpg");
}

#[tokio::test]
async fn test_metadata_arrival_completes_file() {
    let app = setup_test_app().await;
    let key = upload(app.client(), "beach.jpg", "image/jpeg", vec![1]).await;

    app.metadata
        .insert(tagged_record(&key, &["sunset", "sea"]))
        .await
        .unwrap();

    let body: Value = app.client().get("/files").await.json();
    let file = &body["files"][0];
    assert_eq!(file["hasMetadata"], Value::Bool(true));
    assert_eq!(file["status"], "completed");

    let analysis = &file["aiAnalysis"];
    assert_eq!(analysis["tags"], serde_json::json!(["sunset", "sea"]));
    assert_eq!(analysis["transcript"], "");
    assert!(analysis.get("extractedText").is_some());
}

#[tokio::test]
async fn test_old_file_without_metadata_is_processing() {
    let app = setup_test_app().await;

    // Handcraft an object whose sidecar says it was uploaded 20 minutes ago.
    let key = "1700000000000-old.png";
    let dir = app._temp_dir.path();
    std::fs::write(dir.join(key), b"data").unwrap();
    let uploaded_at = chrono::Utc::now() - chrono::Duration::minutes(20);
    let sidecar = serde_json::json!({
        "content_type": "image/png",
        "original_name": "old.png",
        "uploaded_at": uploaded_at.to_rfc3339(),
    });
    std::fs::write(dir.join(format!("{}.meta.json", key)), sidecar.to_string()).unwrap();

    let body: Value = app.client().get("/files").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["files"][0]["status"], "processing");
}

#[tokio::test]
async fn test_search_matches_name_and_tags() {
    let app = setup_test_app().await;
    let client = app.client();

    upload(client, "sunset.jpg", "image/jpeg", vec![1]).await;
    let tagged_key = upload(client, "x.jpg", "image/jpeg", vec![2]).await;
    upload(client, "y.jpg", "image/jpeg", vec![3]).await;

    app.metadata
        .insert(tagged_record(&tagged_key, &["Sunset"]))
        .await
        .unwrap();

    let body: Value = client
        .get("/files")
        .add_query_param("searchText", "sunset")
        .await
        .json();

    assert_eq!(body["total"], 2);
    let names: Vec<&str> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"sunset.jpg"));
    assert!(names.contains(&"x.jpg"));
    assert!(!names.contains(&"y.jpg"));
}

#[tokio::test]
async fn test_file_type_filter() {
    let app = setup_test_app().await;
    let client = app.client();

    upload(client, "a.png", "image/png", vec![1]).await;
    upload(client, "b.mp3", "audio/mpeg", vec![2]).await;

    let body: Value = client
        .get("/files")
        .add_query_param("fileType", "image")
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["files"][0]["name"], "a.png");

    let body: Value = client
        .get("/files")
        .add_query_param("fileType", "all")
        .await
        .json();
    assert_eq!(body["total"], 2);

    let body: Value = client
        .get("/files")
        .add_query_param("fileType", "bogus")
        .await
        .json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_pagination_over_sorted_names() {
    let app = setup_test_app().await;
    let client = app.client();

    upload(client, "a.png", "image/png", vec![1]).await;
    upload(client, "b.png", "image/png", vec![2]).await;
    upload(client, "c.png", "image/png", vec![3]).await;

    let body: Value = client
        .get("/files")
        .add_query_param("sortBy", "name")
        .add_query_param("sortOrder", "asc")
        .add_query_param("limit", "1")
        .add_query_param("offset", "1")
        .await
        .json();

    // Total reflects all matches, the page holds exactly the second item.
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["offset"], 1);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "b.png");
}

#[tokio::test]
async fn test_delete_removes_object_and_metadata() {
    let app = setup_test_app().await;
    let key = upload(app.client(), "gone.png", "image/png", vec![1]).await;
    app.metadata
        .insert(tagged_record(&key, &["tag"]))
        .await
        .unwrap();

    let response = app.client().delete(&format!("/files/{}", key)).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["message"], "File deleted successfully");

    assert!(!app.storage.exists(&key).await.unwrap());
    assert!(app
        .metadata
        .find_by_file_name(&key)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_of_missing_file_still_succeeds() {
    let app = setup_test_app().await;

    let response = app.client().delete("/files/1700000000000-never.png").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["message"], "File deleted successfully");
}
