//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle of a deferred block load: the
//! embed endpoint hands out a placeholder, the callback it points at
//! delivers the block.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use block_cache::{
    api::create_router,
    block::{Block, BlockKind},
    cache::LoadMode,
    render::{FragmentRenderer, InMemoryBlockLoader, RouteUrlGenerator},
    AppState,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

const BASE_URL: &str = "http://blocks.test";

// == Helper Functions ==

async fn seeded_loader() -> Arc<InMemoryBlockLoader> {
    let updated = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let loader = InMemoryBlockLoader::new();

    let slideshow = Block::new(
        "/cms/blocks/tour",
        BlockKind::Slideshow {
            title: Some("Tour".into()),
        },
    )
    .with_updated_at(updated);
    loader
        .insert(
            Block::new("/cms/blocks/tour/1", BlockKind::Text { body: "first".into() })
                .with_parent(&slideshow),
        )
        .await;
    loader
        .insert(
            Block::new("/cms/blocks/tour/2", BlockKind::Text { body: "second".into() })
                .with_parent(&slideshow),
        )
        .await;
    loader.insert(slideshow).await;

    loader
        .insert(
            Block::new(
                "/cms/blocks/intro.en",
                BlockKind::Simple {
                    title: None,
                    body: "<p>hi</p>".into(),
                },
            )
            .with_updated_at(updated)
            .with_locale("en"),
        )
        .await;

    let mut hidden = Block::new("/cms/blocks/hidden", BlockKind::Text { body: "x".into() })
        .with_updated_at(updated);
    hidden.set_enabled(false);
    loader.insert(hidden).await;

    Arc::new(loader)
}

async fn create_test_app(mode: LoadMode) -> Router {
    let loader = seeded_loader().await;
    let renderer = Arc::new(FragmentRenderer::new(loader.clone()));
    let urls = Arc::new(RouteUrlGenerator::for_callbacks(BASE_URL).unwrap());
    create_router(AppState::new(loader, renderer, urls, mode))
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Pulls the first double-quoted URL under `BASE_URL` out of a script.
fn extract_url(markup: &str) -> String {
    let start = markup.find(&format!("\"{BASE_URL}")).unwrap() + 1;
    let end = start + markup[start..].find('"').unwrap();
    markup[start..end].to_string()
}

// == Sync Flow ==

#[tokio::test]
async fn test_sync_embed_then_callback() {
    let app = create_test_app(LoadMode::Sync).await;

    let embed = get(app.clone(), "/blocks/embed?block_id=%2Fcms%2Fblocks%2Fintro.en").await;
    assert_eq!(embed.status(), StatusCode::OK);
    let markup = body_text(embed).await;

    assert_eq!(markup.matches(r#"id="block--cms-blocks-intro-en""#).count(), 1);
    assert!(markup.contains("xhr.open('GET'"));
    let url = extract_url(&markup);
    assert!(url.starts_with("http://blocks.test/_block/js/sync?"));
    assert!(url.contains("block_id=%2Fcms%2Fblocks%2Fintro.en"));
    assert!(url.contains("updated_at=1714564800"));
    assert!(url.contains("locale=en"));

    // Follow the URL the script would request.
    let path = url.trim_start_matches(BASE_URL);
    let callback = get(app, path).await;
    assert_eq!(callback.status(), StatusCode::OK);
    assert_eq!(
        callback.headers()[header::CACHE_CONTROL],
        "private, max-age=86400"
    );
    assert!(callback.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(
        body_text(callback).await,
        r#"<div class="cmf-block cmf-block-simple"><p>hi</p></div>"#
    );
}

// == Async Flow ==

#[tokio::test]
async fn test_async_embed_then_callback() {
    let app = create_test_app(LoadMode::Async).await;

    let embed = get(app.clone(), "/blocks/embed?block_id=%2Fcms%2Fblocks%2Fintro.en").await;
    let markup = body_text(embed).await;
    assert!(markup.contains("document.createElement('script')"));
    assert!(!markup.contains("XMLHttpRequest"));

    let url = extract_url(&markup);
    assert!(url.starts_with("http://blocks.test/_block/js/async?"));

    let callback = get(app, url.trim_start_matches(BASE_URL)).await;
    assert_eq!(callback.status(), StatusCode::OK);
    assert_eq!(
        callback.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );
    assert!(callback.headers()[header::CACHE_CONTROL]
        .to_str()
        .unwrap()
        .starts_with("private"));

    let script = body_text(callback).await;
    assert!(script.contains(r#"document.getElementById("block--cms-blocks-intro-en")"#));
    assert!(script.contains(
        r#"var html = "<div class=\"cmf-block cmf-block-simple\"><p>hi<\/p><\/div>";"#
    ));
}

#[tokio::test]
async fn test_async_callback_renders_children() {
    let app = create_test_app(LoadMode::Async).await;

    let response = get(app, "/_block/js/async?block_id=%2Fcms%2Fblocks%2Ftour").await;
    assert_eq!(response.status(), StatusCode::OK);

    let script = body_text(response).await;
    let first = script.find("first").unwrap();
    let second = script.find("second").unwrap();
    assert!(first < second);
}

// == Not Found ==

#[tokio::test]
async fn test_callback_not_found_in_both_modes() {
    for mode in [LoadMode::Sync, LoadMode::Async] {
        for path in ["/_block/js/sync", "/_block/js/async"] {
            let app = create_test_app(mode).await;
            let response = get(app, &format!("{path}?block_id=%2Fnope&updated_at=1")).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert!(body_text(response).await.is_empty());
        }
    }
}

#[tokio::test]
async fn test_unpublished_block_is_not_found() {
    let app = create_test_app(LoadMode::Sync).await;

    let callback = get(app.clone(), "/_block/js/sync?block_id=%2Fcms%2Fblocks%2Fhidden").await;
    assert_eq!(callback.status(), StatusCode::NOT_FOUND);

    let embed = get(app, "/blocks/embed?block_id=%2Fcms%2Fblocks%2Fhidden").await;
    assert_eq!(embed.status(), StatusCode::NOT_FOUND);
}

// == Error Response Tests ==

#[tokio::test]
async fn test_missing_block_id_is_bad_request() {
    let app = create_test_app(LoadMode::Async).await;

    let response = get(app, "/blocks/embed").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json.get("error").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(LoadMode::Sync).await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert_eq!(json["mode"].as_str().unwrap(), "sync");
    assert!(json.get("timestamp").is_some());
}
