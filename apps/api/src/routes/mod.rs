pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Form page
        .route("/", get(handlers::handle_form_page))
        .route("/evaluate", post(handlers::handle_evaluate_form))
        // JSON API
        .route("/api/v1/evaluations", post(handlers::handle_evaluate_api))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::evaluation::service::tests::{CountingExtractor, MockChatModel, CANNED_REPLY};
    use crate::evaluation::service::Evaluator;

    const BOUNDARY: &str = "----evaluator-test-boundary";

    struct TestApp {
        router: Router,
        extractor: Arc<CountingExtractor>,
        llm: Arc<MockChatModel>,
    }

    fn test_config() -> Config {
        Config {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "http://localhost:0/v1".to_string(),
            port: 0,
            max_upload_mb: 5,
            rust_log: "info".to_string(),
        }
    }

    fn test_app(llm: MockChatModel) -> TestApp {
        let extractor = Arc::new(CountingExtractor::default());
        let llm = Arc::new(llm);
        let state = AppState {
            config: test_config(),
            evaluator: Evaluator::new(extractor.clone(), llm.clone()),
        };
        TestApp {
            router: build_router(state),
            extractor,
            llm,
        }
    }

    /// Builds a multipart body from text fields and an optional (name, bytes) document.
    fn multipart_body(fields: &[(&str, &str)], document: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, bytes)) = document {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"document\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post_multipart(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    const FULL_FIELDS: [(&str, &str); 5] = [
        ("case_id", "A-100"),
        ("client", "ACME"),
        ("project", "Billing migration"),
        ("partner", "Partner KK"),
        ("candidate_info", "Java 10 years"),
    ];

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));

        let response = app
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_form_page_renders() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));

        let response = app
            .router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("SES提案評価ツール v0"));
    }

    #[tokio::test]
    async fn test_api_txt_submission_returns_parsed_result() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));
        let body = multipart_body(&FULL_FIELDS, Some(("resume.txt", "経験: Java".as_bytes())));

        let response = app
            .router
            .oneshot(post_multipart("/api/v1/evaluations", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["case_id"], "A-100");
        assert_eq!(json["result"]["score"], "85点");
        assert_eq!(json["result"]["comment"], "良好");
        assert_eq!(json["result"]["proposal"], "提案A");
        assert_eq!(app.extractor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_form_txt_submission_renders_result_panel() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));
        let body = multipart_body(&FULL_FIELDS, Some(("resume.txt", "経験: Java".as_bytes())));

        let response = app
            .router
            .oneshot(post_multipart("/evaluate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("評価結果 (案件No: A-100)"));
        assert!(html.contains("<strong>点数:</strong> 85点"));
        assert!(html.contains("良好"));
        assert!(html.contains("提案A"));
    }

    #[tokio::test]
    async fn test_api_missing_candidate_info_is_rejected_before_any_work() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));
        let fields: Vec<(&str, &str)> = FULL_FIELDS
            .iter()
            .copied()
            .filter(|(name, _)| *name != "candidate_info")
            .collect();
        let body = multipart_body(&fields, Some(("resume.txt", &b"text"[..])));

        let response = app
            .router
            .oneshot(post_multipart("/api/v1/evaluations", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "INCOMPLETE_INPUT");
        assert_eq!(app.extractor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_form_without_file_shows_incomplete_message() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));
        // Browsers send an empty file part when nothing was chosen.
        let body = multipart_body(&FULL_FIELDS, Some(("", &b""[..])));

        let response = app
            .router
            .oneshot(post_multipart("/evaluate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_string(response).await;
        assert!(html.contains("すべての項目を入力・アップロードしてください。"));
        assert!(!html.contains(r#"class="result""#));
        assert_eq!(app.extractor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_form_csv_upload_shows_unsupported_message() {
        let app = test_app(MockChatModel::replying(CANNED_REPLY));
        let body = multipart_body(&FULL_FIELDS, Some(("skills.csv", &b"a,b,c"[..])));

        let response = app
            .router
            .oneshot(post_multipart("/evaluate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let html = body_string(response).await;
        assert!(html.contains("PDF, DOCX, TXTのみ対応しています。"));
        assert_eq!(app.llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_api_service_failure_is_bad_gateway() {
        let app = test_app(MockChatModel::failing(503));
        let body = multipart_body(&FULL_FIELDS, Some(("resume.txt", &b"text"[..])));

        let response = app
            .router
            .oneshot(post_multipart("/api/v1/evaluations", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "EXTERNAL_SERVICE_ERROR");
        assert_eq!(app.llm.calls.load(Ordering::SeqCst), 1);
    }
}
