//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/config", get(handlers::config::get_config))
        .route("/api/chapters", get(handlers::chapters::list_chapters))
        .route("/api/chapters/{slug}", get(handlers::chapters::get_chapter))
        .route("/api/pages/{slug}", get(handlers::pages::get_page))
        .route("/api/slugs", get(handlers::slugs::get_slugs))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use folio_site::Library;
    use folio_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_chapter("en", "variables", "---\ntitle: Variables\norder: 2\n---\n## Let\n")
            .with_chapter("en", "intro", "---\ntitle: Introduction\norder: 1\n---\nHello")
            .with_chapter("en", "loops", "---\ntitle: Loops\norder: 3\n---\nfor")
            .with_chapter("lo", "intro", "---\ntitle: ບົດນຳ\norder: 1\n---\nສະບາຍດີ")
    }

    fn router(storage: MockStorage) -> Router {
        let library = Library::new(Arc::new(storage))
            .with_locales(vec!["en".to_owned(), "lo".to_owned()], "en");
        create_router(Arc::new(AppState {
            library,
            version: "0.1.0".to_owned(),
        }))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, _, body) = send(router, request).await;
        (status, body)
    }

    fn slugs(chapters: &Value) -> Vec<&str> {
        chapters
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_chapters_sorted() {
        let (status, body) = get(router(storage()), "/api/chapters").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slugs(&body), vec!["intro", "variables", "loops"]);
        assert_eq!(
            body[0],
            json!({"title": "Introduction", "description": "", "order": 1, "slug": "intro"})
        );
    }

    #[tokio::test]
    async fn test_list_chapters_query_locale() {
        let (status, body) = get(router(storage()), "/api/chapters?locale=lo").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slugs(&body), vec!["intro"]);
        assert_eq!(body[0]["title"], "ບົດນຳ");
    }

    #[tokio::test]
    async fn test_list_chapters_cookie_locale() {
        let request = Request::builder()
            .uri("/api/chapters")
            .header(header::COOKIE, "theme=dark; language=lo")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = send(router(storage()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slugs(&body), vec!["intro"]);
    }

    #[tokio::test]
    async fn test_query_locale_wins_over_cookie() {
        let request = Request::builder()
            .uri("/api/chapters?locale=en")
            .header(header::COOKIE, "language=lo")
            .body(Body::empty())
            .unwrap();

        let (_, _, body) = send(router(storage()), request).await;

        assert_eq!(slugs(&body), vec!["intro", "variables", "loops"]);
    }

    #[tokio::test]
    async fn test_empty_query_locale_falls_back() {
        let (_, body) = get(router(storage()), "/api/chapters?locale=").await;

        assert_eq!(slugs(&body), vec!["intro", "variables", "loops"]);
    }

    #[tokio::test]
    async fn test_unknown_locale_is_empty() {
        let (status, body) = get(router(storage()), "/api/chapters?locale=fr").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_invalid_locale_is_bad_request() {
        let (status, body) = get(router(storage()), "/api/chapters?locale=..").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid locale or slug"}));
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let storage = storage().with_failure("en", StorageErrorKind::PermissionDenied);

        let (status, _) = get(router(storage), "/api/chapters").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_chapter_with_navigation() {
        let (status, body) = get(router(storage()), "/api/chapters/variables").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chapter"]["title"], "Variables");
        assert_eq!(body["chapter"]["content"], "## Let\n");
        assert_eq!(body["prev"]["slug"], "intro");
        assert_eq!(body["next"]["slug"], "loops");
    }

    #[tokio::test]
    async fn test_get_chapter_boundaries() {
        let (_, first) = get(router(storage()), "/api/chapters/intro").await;
        let (_, last) = get(router(storage()), "/api/chapters/loops").await;

        assert_eq!(first["prev"], Value::Null);
        assert_eq!(first["next"]["slug"], "variables");
        assert_eq!(last["prev"]["slug"], "variables");
        assert_eq!(last["next"], Value::Null);
    }

    #[tokio::test]
    async fn test_get_chapter_missing_in_locale() {
        let (status, body) = get(router(storage()), "/api/chapters/loops?locale=lo").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Chapter not found"}));
    }

    #[tokio::test]
    async fn test_get_chapter_malformed_is_server_error() {
        let storage = storage().with_chapter("en", "broken", "---\ntitle: [\n---\n");

        let (status, _) = get(router(storage), "/api/chapters/broken").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_page_renders_html() {
        let (status, body) = get(router(storage()), "/api/pages/variables").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["title"], "Variables");
        assert_eq!(body["content"], r#"<h2 id="let">Let</h2>"#);
        assert_eq!(body["toc"], json!([{"level": 2, "title": "Let", "id": "let"}]));
        assert_eq!(body["prev"]["slug"], "intro");
    }

    #[tokio::test]
    async fn test_get_page_not_modified() {
        let router = router(storage());
        let request = Request::builder()
            .uri("/api/pages/intro")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(router.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        let etag = headers.get(header::ETAG).unwrap().clone();

        let request = Request::builder()
            .uri("/api/pages/intro")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(router, request).await;

        assert_eq!(status, StatusCode::NOT_MODIFIED);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_get_page_missing() {
        let (status, _) = get(router(storage()), "/api/pages/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_slugs_union() {
        let storage = storage().with_chapter("lo", "extra", "Only in Lao");

        let (status, body) = get(router(storage), "/api/slugs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["variables", "intro", "loops", "extra"]));
    }

    #[tokio::test]
    async fn test_config() {
        let (status, body) = get(router(storage()), "/api/config").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"locales": ["en", "lo"], "defaultLocale": "en"}));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let request = Request::builder()
            .uri("/api/config")
            .body(Body::empty())
            .unwrap();

        let (_, headers, _) = send(router(storage()), request).await;

        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    }
}
