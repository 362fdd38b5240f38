use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::system::{middleware::request_logger, state::AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Telegram
        .route(
            "/api/telegram/webhook",
            post(handlers::u501_client_lookup::webhook),
        )
        // A001 Client
        .route("/api/clients/search", get(handlers::a001_client::search))
        // U502 Admin notification
        .route(
            "/api/notifications/admins",
            post(handlers::u502_admin_notification::notify_admins),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::{parse_config, DEFAULT_CONFIG};
    use crate::shared::data::InMemoryDocumentStore;
    use crate::shared::messaging::recording::RecordingTransport;
    use crate::system::initialization::build_state;
    use crate::usecases::u501_client_lookup::{messages, InMemorySessionStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SNAPSHOT: &str = r#"{
        "clients": [
            {"id": "c1", "name": "Cafe Dono"},
            {"id": "c2", "name": "Tea House Lotus"}
        ]
    }"#;

    fn app(secret: Option<&str>) -> (Router, Arc<RecordingTransport>) {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.telegram.webhook_secret = secret.map(str::to_string);
        config.bot.admin_chat_ids = vec![1, 2];

        let transport = Arc::new(RecordingTransport::failing_for(&[2]));
        let state = build_state(
            &config,
            Arc::new(InMemoryDocumentStore::from_json_str(SNAPSHOT).unwrap()),
            transport.clone(),
            Arc::new(InMemorySessionStore::new()),
        );
        (configure_routes(state), transport)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(None);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_webhook_handles_start_command() {
        let (app, transport) = app(None);
        let update = json!({"update_id": 1, "message": {"chat": {"id": 100}, "text": "/start"}});

        let response = app
            .oneshot(post_json("/api/telegram/webhook", update))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(transport.texts(), vec![messages::WELCOME.to_string()]);
    }

    #[tokio::test]
    async fn test_webhook_rejects_wrong_secret() {
        let (app, transport) = app(Some("s3cret"));
        let update = json!({"update_id": 1, "message": {"chat": {"id": 100}, "text": "/start"}});

        let mut request = post_json("/api/telegram/webhook", update);
        request
            .headers_mut()
            .insert(handlers::u501_client_lookup::SECRET_HEADER, "nope".parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_accepts_matching_secret() {
        let (app, transport) = app(Some("s3cret"));
        let update = json!({"update_id": 1, "message": {"chat": {"id": 100}, "text": "/help"}});

        let mut request = post_json("/api/telegram/webhook", update);
        request
            .headers_mut()
            .insert(handlers::u501_client_lookup::SECRET_HEADER, "s3cret".parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(transport.texts(), vec![messages::HELP.to_string()]);
    }

    #[tokio::test]
    async fn test_webhook_always_acknowledges_delivery() {
        let (app, _) = app(None);
        let request = Request::builder()
            .method("POST")
            .uri("/api/telegram/webhook")
            .body(Body::from("not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_client_search() {
        let (app, _) = app(None);
        let response = app
            .oneshot(
                Request::get("/api/clients/search?q=%D0%BA%D0%B0%D1%84%D0%B5%20%D0%B4%D0%BE%D0%BD%D0%BE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["c1"]);
    }

    #[tokio::test]
    async fn test_admin_notification_summary() {
        let (app, _) = app(None);
        let response = app
            .oneshot(post_json("/api/notifications/admins", json!({"text": "Поставка"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"total": 2, "sent": 1, "failed": 1})
        );
    }

    #[tokio::test]
    async fn test_admin_notification_rejects_empty_text() {
        let (app, _) = app(None);
        let response = app
            .oneshot(post_json("/api/notifications/admins", json!({"text": "  "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
