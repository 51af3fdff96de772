use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        news::{create_news, delete_news, get_news, list_news, update_news},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/news", get(list_news).post(create_news))
        .route(
            "/news/{id}",
            get(get_news).put(update_news).delete(delete_news),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::{Duration as ChronoDuration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_app(AppState::default(), Duration::from_secs(10))
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn sample_payload(title: &str) -> Value {
        json!({
            "title": title,
            "category": "world",
            "content_blocks": [
                { "type": "text", "content": "First paragraph", "position": 0 },
                { "type": "link", "content": "https://example.com", "position": 1 }
            ]
        })
    }

    async fn create(app: &Router, payload: Value) -> Value {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/news", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let response = app.clone().oneshot(empty_request("GET", "/livez")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(empty_request("GET", "/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_news_empty() {
        let response = app()
            .oneshot(empty_request("GET", "/api/news"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["items"], json!([]));
        assert_eq!(json["total_count"], 0);
        assert_eq!(json["page"], 1);
        assert_eq!(json["limit"], 10);
    }

    #[tokio::test]
    async fn test_create_and_get_news() {
        let app = app();

        let created = create(&app, sample_payload("Breaking story")).await;
        let id = created["id"].as_i64().unwrap();
        assert!(id > 0);
        assert_eq!(created["content_blocks"][0]["type"], "text");
        assert_eq!(created["content_blocks"][1]["content"], "https://example.com");

        let response = app
            .oneshot(empty_request("GET", &format!("/api/news/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_create_rejects_short_title() {
        let response = app()
            .oneshot(json_request("POST", "/api/news", sample_payload("No")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], 400);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/news")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_block_type() {
        let payload = json!({
            "title": "Bad block",
            "category": "world",
            "content_blocks": [{ "type": "video", "content": "x", "position": 0 }]
        });

        let response = app()
            .oneshot(json_request("POST", "/api/news", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let app = app();

        for uri in ["/api/news/abc", "/api/news/0", "/api/news/-4"] {
            let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn test_get_rejects_bad_visibility_flag_and_ignores_query_id() {
        let app = app();
        let created = create(&app, sample_payload("Flag parsing")).await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/news/{id}?check_visibility=maybe"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/api/news/{id}?id=999&check_visibility=t"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], id);
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let response = app()
            .oneshot(empty_request("GET", "/api/news/999"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["status"], 404);
        assert_eq!(json["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_scheduled_news_respects_check_visibility() {
        let app = app();
        let start = Utc::now() + ChronoDuration::hours(1);
        let mut payload = sample_payload("Embargoed story");
        payload["start_time"] = json!(start);

        let created = create(&app, payload).await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/news/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/news/{id}?check_visibility=false"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/news"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["items"], json!([]));
        assert_eq!(json["total_count"], 1);

        let response = app
            .oneshot(empty_request("GET", "/api/news?check_visibility=0"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["items"][0]["id"], id);
    }

    #[tokio::test]
    async fn test_update_news() {
        let app = app();
        let created = create(&app, sample_payload("Original title")).await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/news/{id}"),
                json!({ "title": "Revised title" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let ack = body_json(response).await;
        assert_eq!(ack["id"], id);
        assert_eq!(ack["message"], "News updated successfully");

        let response = app
            .oneshot(empty_request("GET", &format!("/api/news/{id}")))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["title"], "Revised title");
        assert_eq!(json["content_blocks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_rejects_inverted_window() {
        let app = app();
        let created = create(&app, sample_payload("Window check")).await;
        let id = created["id"].as_i64().unwrap();
        let now = Utc::now();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/news/{id}"),
                json!({ "start_time": now, "end_time": now - ChronoDuration::hours(1) }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_is_404() {
        let response = app()
            .oneshot(json_request(
                "PUT",
                "/api/news/42",
                json!({ "title": "Nobody home" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_news() {
        let app = app();
        let created = create(&app, sample_payload("Short lived")).await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/news/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "News deleted successfully");

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/news/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request("DELETE", &format!("/api/news/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let app = app();
        for title in ["Alpha report", "Beta report", "Gamma digest"] {
            create(&app, sample_payload(title)).await;
        }

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                "/api/news?search=REPORT&sort_by=title&sort_dir=asc",
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["total_count"], 2);
        assert_eq!(json["items"][0]["title"], "Alpha report");
        assert_eq!(json["items"][1]["title"], "Beta report");

        let response = app
            .oneshot(empty_request("GET", "/api/news?page=2&limit=2&sort_by=title&sort_dir=asc"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["total_count"], 3);
        assert_eq!(json["page"], 2);
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
        assert_eq!(json["items"][0]["title"], "Gamma digest");
    }

    #[tokio::test]
    async fn test_list_rejects_bad_pagination() {
        let app = app();

        for uri in ["/api/news?page=0", "/api/news?limit=101", "/api/news?limit=abc"] {
            let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        }
    }
}
