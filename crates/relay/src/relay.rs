//! Webhook endpoint: decode the notification, fire an alert, answer 200.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::alert::Alerter;

pub fn create_router(alerter: Arc<dyn Alerter>) -> Router {
    // Any path is accepted; *Arr webhook URLs vary between installs.
    Router::new()
        .fallback_service(post(receive).with_state(alerter))
        .layer(TraceLayer::new_for_http())
}

/// Title preference: series, then movie, then a literal fallback.
///
/// A null, missing or empty title falls through to the next candidate.
pub fn extract_title(payload: &Value) -> &str {
    title_at(payload, "/series/title")
        .or_else(|| title_at(payload, "/movie/title"))
        .unwrap_or("Unknown")
}

fn title_at<'a>(payload: &'a Value, pointer: &str) -> Option<&'a str> {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
}

/// The response is 200 with an empty body no matter what arrived; senders
/// retry on anything else and there is nothing useful to tell them.
async fn receive(State(alerter): State<Arc<dyn Alerter>>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => {
            let event_type = payload
                .get("eventType")
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let title = extract_title(&payload);
            debug!(event_type, title, "Webhook received");
            alerter.alert(title).await;
        }
        Err(e) => {
            warn!(error = %e, "Discarding webhook body that is not valid JSON");
        }
    }
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Alerter;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records titles instead of shelling out.
    struct RecordingAlerter {
        titles: Mutex<Vec<String>>,
    }

    impl RecordingAlerter {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                titles: Mutex::new(Vec::new()),
            })
        }

        fn titles(&self) -> Vec<String> {
            self.titles.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Alerter for RecordingAlerter {
        async fn alert(&self, title: &str) {
            self.titles.lock().unwrap().push(title.to_string());
        }
    }

    fn post_request(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_extract_title_prefers_series() {
        let payload = json!({
            "series": { "title": "Show A" },
            "movie": { "title": "Film B" }
        });
        assert_eq!(extract_title(&payload), "Show A");
    }

    #[test]
    fn test_extract_title_falls_back_to_movie() {
        let payload = json!({ "movie": { "title": "Film B" } });
        assert_eq!(extract_title(&payload), "Film B");
    }

    #[test]
    fn test_extract_title_skips_null_series_title() {
        let payload = json!({
            "series": { "title": null },
            "movie": { "title": "Film B" }
        });
        assert_eq!(extract_title(&payload), "Film B");
    }

    #[test]
    fn test_extract_title_skips_empty_series_title() {
        let payload = json!({
            "series": { "title": "" },
            "movie": { "title": "Film B" }
        });
        assert_eq!(extract_title(&payload), "Film B");
    }

    #[test]
    fn test_extract_title_unknown() {
        assert_eq!(extract_title(&json!({ "eventType": "Download" })), "Unknown");
        assert_eq!(extract_title(&json!({ "series": {} })), "Unknown");
    }

    #[tokio::test]
    async fn test_series_event_triggers_alert() {
        let alerter = RecordingAlerter::new();
        let app = create_router(alerter.clone());

        let body = r#"{"eventType":"Download","series":{"title":"Show A"}}"#;
        let response = app.oneshot(post_request("/", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(alerter.titles(), vec!["Show A".to_string()]);
    }

    #[tokio::test]
    async fn test_movie_event_triggers_alert() {
        let alerter = RecordingAlerter::new();
        let app = create_router(alerter.clone());

        let body = r#"{"eventType":"Download","movie":{"title":"Film B"}}"#;
        let response = app.oneshot(post_request("/hooks/radarr", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(alerter.titles(), vec!["Film B".to_string()]);
    }

    #[tokio::test]
    async fn test_body_without_titles_alerts_unknown() {
        let alerter = RecordingAlerter::new();
        let app = create_router(alerter.clone());

        let response = app
            .oneshot(post_request("/", r#"{"eventType":"Download"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(alerter.titles(), vec!["Unknown".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_json_still_answers_200() {
        let alerter = RecordingAlerter::new();
        let app = create_router(alerter.clone());

        let response = app.oneshot(post_request("/", "not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(alerter.titles().is_empty());
    }

    #[tokio::test]
    async fn test_any_path_is_accepted() {
        let alerter = RecordingAlerter::new();
        let app = create_router(alerter.clone());

        let body = r#"{"series":{"title":"Show A"}}"#;
        let response = app
            .oneshot(post_request("/some/arbitrary/path", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(alerter.titles(), vec!["Show A".to_string()]);
    }
}
