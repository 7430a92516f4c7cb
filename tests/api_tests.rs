use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use talenthub::config::Config;
use tower::ServiceExt;

/// Credentials seeded by the admin migration when no env overrides are set.
const ADMIN_USER: &str = "admin";
const ADMIN_PASS: &str = "admin123";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.uploads.path = test_uploads_dir();

    let state = talenthub::api::create_app_state(config)
        .await
        .expect("Failed to create app state");
    talenthub::api::router(state)
}

fn test_uploads_dir() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    std::env::temp_dir()
        .join(format!(
            "talenthub-test-uploads-{}-{}",
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

async fn post_json(app: &Router, uri: &str, token: Option<&str>, json: &serde_json::Value) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::from(json.to_string())).unwrap())
        .await
        .unwrap()
}

async fn put_json(app: &Router, uri: &str, token: &str, json: &serde_json::Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn login(app: &Router) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        None,
        &serde_json::json!({"username": ADMIN_USER, "password": ADMIN_PASS}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Encode text fields as a multipart/form-data body for the legacy admin
/// form endpoints.
fn multipart_body(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let boundary = "talenthub-test-boundary";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    (
        format!("multipart/form-data; boundary={boundary}"),
        body.into_bytes(),
    )
}

async fn post_form(
    app: &Router,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
) -> axum::response::Response {
    let (content_type, body) = multipart_body(fields);
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", content_type)
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let app = spawn_app().await;

    let response = get(&app, "/api/contacts", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/contacts", Some("garbage-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/blogs", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_sets_cookie_and_cookie_authenticates() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        &serde_json::json!({"username": ADMIN_USER, "password": ADMIN_PASS}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set the auth cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("auth-token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let body = body_json(response).await;
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["username"], ADMIN_USER);

    // The cookie alone must authenticate a protected route.
    let cookie_pair = cookie.split(';').next().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/contacts")
                .header("Cookie", cookie_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_rejected_without_cookie() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        &serde_json::json!({"username": ADMIN_USER, "password": "wrong"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn test_contact_submission_flow() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = post_json(
        &app,
        "/api/contact",
        None,
        &serde_json::json!({"name": "Ana", "email": "ana@x.com", "message": "hi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "new");

    let response = post_json(
        &app,
        "/api/contact",
        None,
        &serde_json::json!({"name": "Bob", "email": "not-an-email", "message": "hi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Only the valid submission exists.
    let response = get(&app, "/api/contacts", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let contacts = body["data"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["email"], "ana@x.com");
    assert_eq!(contacts[0]["status"], "new");
}

#[tokio::test]
async fn test_blog_slug_allocation_and_conflicts() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let blog = serde_json::json!({
        "title": "Hello World",
        "content": "first",
        "status": "draft"
    });

    let response = post_json(&app, "/api/blogs", Some(token.as_str()), &blog).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "hello-world");
    let first_id = body["data"]["id"].as_i64().unwrap();

    // Identical title: the allocator appends -1, not a higher suffix.
    let response = post_json(&app, "/api/blogs", Some(token.as_str()), &blog).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "hello-world-1");

    // A hand-edited duplicate slug is a conflict.
    let response = post_json(
        &app,
        "/api/blogs",
        Some(token.as_str()),
        &serde_json::json!({
            "title": "Other",
            "content": "x",
            "slug": "hello-world"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Updating without changing the title keeps the slug.
    let response = put_json(
        &app,
        &format!("/api/blogs/{first_id}"),
        &token,
        &serde_json::json!({
            "title": "Hello World",
            "content": "edited",
            "status": "published"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "hello-world");
    assert_eq!(body["data"]["content"], "edited");

    // Changing the title regenerates the slug, excluding the row itself.
    let response = put_json(
        &app,
        &format!("/api/blogs/{first_id}"),
        &token,
        &serde_json::json!({
            "title": "Fresh Title",
            "content": "edited",
            "status": "published"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "fresh-title");
}

#[tokio::test]
async fn test_published_listing_is_public_and_filtered() {
    let app = spawn_app().await;
    let token = login(&app).await;

    for (title, status) in [("Draft post", "draft"), ("Live post", "published")] {
        let response = post_json(
            &app,
            "/api/blogs",
            Some(token.as_str()),
            &serde_json::json!({"title": title, "content": "body", "status": status}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/api/blogs?published=true", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let blogs = body["data"].as_array().unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0]["title"], "Live post");

    // The unfiltered listing is admin-only.
    let response = get(&app, "/api/blogs", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/blogs", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_job_position_requirements_roundtrip() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = post_json(
        &app,
        "/api/job-positions",
        Some(token.as_str()),
        &serde_json::json!({
            "title": "Backend Engineer",
            "department": "Engineering",
            "requirements": ["A", "B"],
            "responsibilities": ["Ship", "Review"],
            "is_active": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let response = get(&app, &format!("/api/job-positions/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["requirements"], serde_json::json!(["A", "B"]));
    assert_eq!(
        body["data"]["responsibilities"],
        serde_json::json!(["Ship", "Review"])
    );
}

#[tokio::test]
async fn test_job_position_listing_orders_featured_first() {
    let app = spawn_app().await;
    let token = login(&app).await;

    for (title, featured) in [("Plain A", false), ("Starred", true), ("Plain B", false)] {
        let response = post_json(
            &app,
            "/api/job-positions",
            Some(token.as_str()),
            &serde_json::json!({
                "title": title,
                "department": "Ops",
                "is_active": true,
                "is_featured": featured
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/api/job-positions", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles[0], "Starred");
    assert_eq!(titles.len(), 3);
}

#[tokio::test]
async fn test_hero_slide_exclusive_activation() {
    let app = spawn_app().await;
    let token = login(&app).await;

    // Two slides created active in sequence: only the second stays active.
    for title in ["First slide", "Second slide"] {
        let response = post_form(
            &app,
            "/api/hero-slides",
            &token,
            &[
                ("action", "create"),
                ("title", title),
                ("description", "A slide"),
                ("visual_type", "dashboard"),
                ("is_active", "1"),
                ("sort_order", "1"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()["location"].to_str().unwrap();
        assert!(location.contains("message=slide-created"), "{location}");
    }

    let response = get(&app, "/api/hero-slides", Some(token.as_str())).await;
    let body = body_json(response).await;
    let slides = body["data"].as_array().unwrap().clone();
    assert_eq!(slides.len(), 2);

    let active: Vec<&serde_json::Value> = slides
        .iter()
        .filter(|s| s["is_active"].as_bool().unwrap())
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["title"], "Second slide");

    // Re-activating the first flips exclusivity back.
    let first_id = slides
        .iter()
        .find(|s| s["title"] == "First slide")
        .unwrap()["id"]
        .as_i64()
        .unwrap()
        .to_string();

    let response = post_form(
        &app,
        "/api/hero-slides",
        &token,
        &[("action", "toggle-status"), ("id", &first_id), ("status", "1")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = get(&app, "/api/hero-slides", Some(token.as_str())).await;
    let body = body_json(response).await;
    let active_titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["is_active"].as_bool().unwrap())
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(active_titles, vec!["First slide"]);
}

#[tokio::test]
async fn test_activating_missing_slide_leaves_state_untouched() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = post_form(
        &app,
        "/api/hero-slides",
        &token,
        &[
            ("action", "create"),
            ("title", "Only slide"),
            ("description", "desc"),
            ("is_active", "1"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Activating a nonexistent id must fail without deactivating anything.
    let response = post_form(
        &app,
        "/api/hero-slides",
        &token,
        &[("action", "toggle-status"), ("id", "9999"), ("status", "1")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.contains("error=slide-not-found"), "{location}");

    let response = get(&app, "/api/hero-slides/active", None).await;
    let body = body_json(response).await;
    let active = body["data"].as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["title"], "Only slide");
}

#[tokio::test]
async fn test_banner_exclusive_activation() {
    let app = spawn_app().await;
    let token = login(&app).await;

    for title in ["Banner one", "Banner two"] {
        let response = post_json(
            &app,
            "/api/banners",
            Some(token.as_str()),
            &serde_json::json!({
                "title": title,
                "banner_type": "news",
                "is_active": true
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/api/banners/active", None).await;
    let body = body_json(response).await;
    let active = body["data"].as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["title"], "Banner two");
}

#[tokio::test]
async fn test_newsletter_resubscribe_keeps_single_row() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let subscribe = serde_json::json!({"email": "reader@x.com", "type": "blog"});

    let response = post_json(&app, "/api/newsletter/subscribe", None, &subscribe).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Subscribing an active email is a conflict.
    let response = post_json(&app, "/api/newsletter/subscribe", None, &subscribe).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        &app,
        "/api/newsletter/unsubscribe",
        None,
        &serde_json::json!({"email": "reader@x.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Re-subscribing flips the existing row back to active.
    let response = post_json(&app, "/api/newsletter/subscribe", None, &subscribe).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/api/newsletter", Some(token.as_str())).await;
    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], "reader@x.com");
    assert_eq!(rows[0]["status"], "active");
    assert!(rows[0]["unsubscribed_at"].is_null());
}

#[tokio::test]
async fn test_primary_admin_cannot_be_deleted() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/users/1")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The row is still present.
    let response = get(&app, "/api/users", Some(token.as_str())).await;
    let body = body_json(response).await;
    let users = body["data"].as_array().unwrap();
    assert!(users.iter().any(|u| u["username"] == ADMIN_USER));
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = post_json(
        &app,
        "/api/users",
        Some(token.as_str()),
        &serde_json::json!({"username": "editor", "password": "secret1", "role": "editor"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &app,
        "/api/users",
        Some(token.as_str()),
        &serde_json::json!({"username": "editor", "password": "secret2", "role": "viewer"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
