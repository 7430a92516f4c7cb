use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use talenthub::config::Config;
use tower::ServiceExt;

const ADMIN_USER: &str = "admin";
const ADMIN_PASS: &str = "admin123";

const BOUNDARY: &str = "talenthub-smoke-boundary";

async fn spawn_app() -> (Router, Config) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.uploads.path = test_uploads_dir();

    let state = talenthub::api::create_app_state(config.clone())
        .await
        .expect("Failed to create app state");
    (talenthub::api::router(state), config)
}

fn test_uploads_dir() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    std::env::temp_dir()
        .join(format!(
            "talenthub-smoke-uploads-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ))
        .to_string_lossy()
        .into_owned()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"username": ADMIN_USER, "password": ADMIN_PASS}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Multipart body mixing text fields with one optional file part.
fn multipart_with_file(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((name, filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

async fn post_multipart(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    content_type: String,
    body: Vec<u8>,
) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", content_type);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_blog_read_includes_rendered_html() {
    let (app, _config) = spawn_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/blogs")
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::json!({
                        "title": "Hiring in 2024",
                        "content": "# Intro\n\nsome **bold** text",
                        "status": "published"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let slug = body["data"]["slug"].as_str().unwrap().to_string();
    assert_eq!(slug, "hiring-in-2024");

    // Public read by slug carries both the markdown source and the HTML.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/blogs/slug/{slug}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let html = body["data"]["content_html"].as_str().unwrap();
    assert!(html.contains("<h1"));
    assert!(html.contains(r#"<strong class="font-bold">bold</strong>"#));
}

#[tokio::test]
async fn test_image_upload_lands_on_disk() {
    let (app, config) = spawn_app().await;
    let token = login(&app).await;

    // Minimal PNG header plus padding; validation goes by the declared
    // MIME type, not content sniffing.
    let png: Vec<u8> = [&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A][..], &[0u8; 64]].concat();

    let (content_type, body) =
        multipart_with_file(&[], Some(("image", "photo.png", "image/png", &png)));
    let response = post_multipart(&app, "/api/uploads/image", Some(token.as_str()), content_type, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let filename = body["data"]["filename"].as_str().unwrap();
    assert!(filename.starts_with("blog-"));
    assert!(filename.ends_with(".png"));
    assert_eq!(
        body["data"]["url"].as_str().unwrap(),
        format!("/uploads/{filename}")
    );

    let on_disk = std::path::Path::new(&config.uploads.path).join(filename);
    assert!(on_disk.exists());

    let _ = std::fs::remove_dir_all(&config.uploads.path);
}

#[tokio::test]
async fn test_image_upload_rejects_disallowed_type() {
    let (app, _config) = spawn_app().await;
    let token = login(&app).await;

    let (content_type, body) = multipart_with_file(
        &[],
        Some(("image", "script.svg", "image/svg+xml", b"<svg/>".as_slice())),
    );
    let response = post_multipart(&app, "/api/uploads/image", Some(token.as_str()), content_type, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_application_with_cv_and_orphaned_position() {
    let (app, config) = spawn_app().await;
    let token = login(&app).await;

    // A position to apply against.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/job-positions")
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::json!({
                        "title": "HR Consultant",
                        "department": "Consulting",
                        "is_active": true
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let position_id = body["data"]["id"].as_i64().unwrap().to_string();

    let (content_type, body) = multipart_with_file(
        &[
            ("name", "Carla"),
            ("email", "carla@x.com"),
            ("position", "HR Consultant"),
            ("position_id", &position_id),
        ],
        Some(("cv", "cv.pdf", "application/pdf", b"%PDF-1.4 test".as_slice())),
    );
    let response = post_multipart(&app, "/api/recruitments", None, content_type, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let cv_path = body["data"]["cv_path"].as_str().unwrap().to_string();
    assert!(cv_path.starts_with("/uploads/cv/cv_"));
    assert!(cv_path.ends_with(".pdf"));

    let cv_file = std::path::Path::new(&config.uploads.path)
        .join("cv")
        .join(cv_path.rsplit('/').next().unwrap());
    assert!(cv_file.exists());

    // Admin listing resolves the position title through the join.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/recruitments")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["position_title"], "HR Consultant");

    // Deleting the position orphans the application instead of cascading.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/job-positions/{position_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/recruitments")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Carla");
    assert!(rows[0]["position_title"].is_null());

    let _ = std::fs::remove_dir_all(&config.uploads.path);
}

#[tokio::test]
async fn test_cv_upload_rejects_wrong_type() {
    let (app, _config) = spawn_app().await;

    let (content_type, body) = multipart_with_file(
        &[
            ("name", "Dana"),
            ("email", "dana@x.com"),
            ("position", "Any"),
        ],
        Some(("cv", "cv.exe", "application/octet-stream", b"MZ".as_slice())),
    );
    let response = post_multipart(&app, "/api/recruitments", None, content_type, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_resources_return_404() {
    let (app, _config) = spawn_app().await;
    let token = login(&app).await;

    for uri in [
        "/api/blogs/999",
        "/api/blogs/slug/no-such-post",
        "/api/job-positions/999",
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    for uri in ["/api/contacts/999", "/api/recruitments/999", "/api/banners/999"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_newsletter_status_endpoint() {
    let (app, _config) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/newsletter/status?email=ghost@x.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].is_null());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/newsletter/subscribe")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"email": "ghost@x.com", "type": "career"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/newsletter/status?email=ghost@x.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["type"], "career");
}
