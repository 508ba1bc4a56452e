//! End-to-end checks of the HTTP surface through the router, no listener.

mod support;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sha2::{Digest, Sha256};
use tower::ServiceExt;

use support::MemoryDocuments;
use vetrina::{
    application::{
        admin::AdminContentService, auth::AdminAuthService, cache::PortfolioCache,
        store::ContentStore,
    },
    domain::collections::Collection,
    infra::{
        http::{HttpState, SESSION_COOKIE, build_router},
        uploads::UploadStorage,
    },
};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct horse";
const UPLOAD_LIMIT: usize = 1024 * 1024;

struct TestApp {
    router: Router,
    repo: Arc<MemoryDocuments>,
    _uploads: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let repo = Arc::new(MemoryDocuments::default());
    let cache = PortfolioCache::new(ContentStore::new(repo.clone()));
    cache.init().await;

    let uploads = tempfile::tempdir().expect("temp uploads dir");
    let upload_storage =
        Arc::new(UploadStorage::new(uploads.path().to_path_buf()).expect("upload storage"));

    let digest = hex::encode(Sha256::digest(ADMIN_PASSWORD.as_bytes()));
    let auth = Arc::new(AdminAuthService::new(
        ADMIN_EMAIL.to_string(),
        &digest,
        time::Duration::minutes(30),
    ));

    let state = HttpState {
        admin: AdminContentService::new(cache.clone()),
        cache,
        auth,
        upload_storage,
    };

    TestApp {
        router: build_router(state, UPLOAD_LIMIT),
        repo,
        _uploads: uploads,
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Log in and return the session cookie pair for subsequent requests.
async fn login(app: &TestApp) -> String {
    let response = app
        .router
        .clone()
        .oneshot(post_form(
            "/admin/login",
            &format!("email={ADMIN_EMAIL}&password=correct+horse"),
        ))
        .await
        .expect("login response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .expect("cookie header is ascii");
    assert!(set_cookie.starts_with(SESSION_COOKIE));
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn landing_page_renders_default_hero_content() {
    let app = spawn_app().await;

    let response = app.router.clone().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Nelavalli Phanindra"));
    assert!(body.contains("About Me"));
}

#[tokio::test]
async fn stored_content_shows_up_on_the_landing_page() {
    let app = spawn_app().await;
    app.repo.seed(
        Collection::Skills,
        serde_json::json!({ "name": "Rust", "category": "Languages", "level": 92 }),
    );

    // Freshly seeded data is only visible after a reload of the section.
    let session = login(&app).await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/refresh/skills")
                .header(header::COOKIE, &session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.router.clone().oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Rust"));
}

#[tokio::test]
async fn unknown_routes_render_the_not_found_page() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/no/such/page"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_assets_are_served_with_a_content_type() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/static/site.css"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/css"));
}

#[tokio::test]
async fn missing_uploads_return_not_found() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/uploads/2024/01/01/nothing-here.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn db_health_reports_no_content_when_reachable() {
    let app = spawn_app().await;

    let response = app.router.clone().oneshot(get("/_health/db")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    app.repo.set_offline(true);
    let response = app.router.clone().oneshot(get("/_health/db")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/admin/dashboard"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/login"
    );
}

#[tokio::test]
async fn bad_credentials_are_rejected_without_a_cookie() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            "/admin/login",
            &format!("email={ADMIN_EMAIL}&password=wrong"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn login_grants_access_to_the_dashboard() {
    let app = spawn_app().await;
    let session = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/dashboard")
                .header(header::COOKIE, &session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Dashboard"));
}

#[tokio::test]
async fn admin_writes_persist_through_the_store() {
    let app = spawn_app().await;
    let session = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/skills")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &session)
                .body(Body::from("name=Rust&category=Languages&level=250"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.repo.count(Collection::Skills), 1);

    // Levels above 100 are clamped before the write.
    let response = app.router.clone().oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("width: 100%"));
}

#[tokio::test]
async fn rejected_validation_leaves_the_store_untouched() {
    let app = spawn_app().await;
    let session = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/skills")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &session)
                .body(Body::from("name=+++&category=Languages&level=50"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Failures flow back to the dashboard as a flash, not an error page.
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.repo.count(Collection::Skills), 0);
}

#[tokio::test]
async fn logout_invalidates_the_session_cookie() {
    let app = spawn_app().await;
    let session = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .header(header::COOKIE, &session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/dashboard")
                .header(header::COOKIE, &session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
