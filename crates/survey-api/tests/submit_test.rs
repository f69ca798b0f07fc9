use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use survey_api::{ApiConfig, ApiServer, AppState};
use survey_core::{FormValidator, ValidatedSubmission};
use tower::util::ServiceExt;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const BOUNDARY: &str = "survey-test-boundary";

/// Create a test application from the given configuration
fn create_test_app_with(config: ApiConfig) -> axum::Router {
    let state = AppState::new(FormValidator::new(), config);
    ApiServer::new(state).unwrap().router()
}

fn create_test_app() -> axum::Router {
    create_test_app_with(ApiConfig::default())
}

/// Send a request and return the status, content type and body
async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> (StatusCode, Option<String>, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(body.into()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, body_bytes.to_vec())
}

/// Post a url-encoded form and parse the JSON reply
async fn submit_form(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let (status, _, bytes) = send(app, "POST", uri, Some(URLENCODED), body.to_string()).await;

    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes).to_string()));

    (status, body)
}

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

#[tokio::test]
async fn test_submit_full_form() {
    let app = create_test_app();

    let (status, content_type, bytes) = send(
        app,
        "POST",
        "/submit",
        Some(URLENCODED),
        "name=Alice&email=alice%40example.com&age=+30+&role=developer&recommend=yes\
         &improvements=speed&improvements=docs&comments=Great+work%21",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "age": 30,
            "role": "developer",
            "recommend": "yes",
            "improvements": ["speed", "docs"],
            "comments": "Great work!"
        })
    );

    let submission: ValidatedSubmission = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(submission.age, 30);
    assert_eq!(submission.improvements, vec!["speed", "docs"]);
}

#[tokio::test]
async fn test_submit_without_improvements() {
    let app = create_test_app();

    let (status, body) = submit_form(app, "/submit", "name=Bob&age=41").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["improvements"], json!([]));
    assert_eq!(body["email"], "");
    assert_eq!(body["comments"], "");
}

#[tokio::test]
async fn test_submit_missing_age_fails() {
    let app = create_test_app();

    let (status, body) = submit_form(app, "/submit", "name=Bob").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "age is empty");
}

#[tokio::test]
async fn test_submit_blank_age_fails() {
    let app = create_test_app();

    let (status, body) = submit_form(app, "/submit", "name=Bob&age=++++").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "age is empty");
}

#[tokio::test]
async fn test_submit_non_numeric_age_fails() {
    for age in ["abc", "12.5", "1e3"] {
        let app = create_test_app();

        let (status, body) = submit_form(app, "/submit", &format!("age={age}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "age={age}");
        assert!(
            body.as_str().unwrap().starts_with("failed to parse age"),
            "unexpected body {body}"
        );
    }
}

#[tokio::test]
async fn test_submit_negative_age_accepted() {
    let app = create_test_app();

    let (status, body) = submit_form(app, "/submit", "age=-3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], -3);
}

#[tokio::test]
async fn test_submit_rejects_other_methods() {
    for method in ["GET", "PUT", "DELETE"] {
        let app = create_test_app();

        let (status, _, _) = send(app, method, "/submit?age=30", None, Body::empty()).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
}

#[tokio::test]
async fn test_submit_multipart_matches_urlencoded() {
    let fields = [
        ("name", "Alice"),
        ("age", "30"),
        ("improvements", "speed"),
        ("improvements", "docs"),
    ];

    let (status, _, bytes) = send(
        create_test_app(),
        "POST",
        "/submit",
        Some(&format!("multipart/form-data; boundary={BOUNDARY}")),
        multipart_body(&fields),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let multipart: Value = serde_json::from_slice(&bytes).unwrap();

    let (status, urlencoded) = submit_form(
        create_test_app(),
        "/submit",
        "name=Alice&age=30&improvements=speed&improvements=docs",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(multipart, urlencoded);
}

#[tokio::test]
async fn test_submit_multipart_content_type_any_case() {
    let app = create_test_app();

    let (status, _, bytes) = send(
        app,
        "POST",
        "/submit",
        Some(&format!("Multipart/Form-Data; boundary={BOUNDARY}")),
        multipart_body(&[("age", "30")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["age"], 30);
}

#[tokio::test]
async fn test_submit_truncated_multipart_fails() {
    let app = create_test_app();

    let truncated = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"age\"\r\n\r\n30"
    );
    let (status, _, _) = send(
        app,
        "POST",
        "/submit",
        Some(&format!("multipart/form-data; boundary={BOUNDARY}")),
        truncated,
    )
    .await;

    assert!(status.is_client_error(), "unexpected status {status}");
}

#[tokio::test]
async fn test_submit_query_pairs_follow_body() {
    let app = create_test_app();

    let (status, body) = submit_form(
        app,
        "/submit?age=99&improvements=extra",
        "age=30&improvements=speed",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 30);
    assert_eq!(body["improvements"], json!(["speed", "extra"]));
}

#[tokio::test]
async fn test_submit_unsupported_content_type() {
    let app = create_test_app();

    let (status, _, _) = send(
        app,
        "POST",
        "/submit",
        Some("application/json"),
        r#"{"age": 30}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_submit_body_too_large() {
    let app = create_test_app_with(ApiConfig {
        max_body_bytes: 64,
        ..Default::default()
    });

    let body = format!("age=30&comments={}", "a".repeat(256));
    let (status, _) = submit_form(app, "/submit", &body).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let (status, _, bytes) = send(app, "GET", "/health", None, Body::empty()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["swagger_enabled"], true);
    assert_eq!(body["max_body_bytes"], 1024 * 1024);
    assert!(body["uptime_secs"].is_u64());
}

#[tokio::test]
async fn test_health_reports_configured_limits() {
    let app = create_test_app_with(ApiConfig {
        enable_swagger: false,
        max_body_bytes: 4096,
        ..Default::default()
    });

    let (status, _, bytes) = send(app, "GET", "/health", None, Body::empty()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["swagger_enabled"], false);
    assert_eq!(body["max_body_bytes"], 4096);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = create_test_app();

    let (status, _, bytes) = send(app, "GET", "/api-docs/openapi.json", None, Body::empty()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    let request_content = &body["paths"]["/submit"]["post"]["requestBody"]["content"];
    assert!(request_content["application/x-www-form-urlencoded"].is_object());
    assert!(request_content["multipart/form-data"].is_object());
    assert!(body["components"]["schemas"]["SubmissionForm"]["properties"]["improvements"].is_object());
    assert!(body["components"]["schemas"]["ValidatedSubmission"].is_object());
}

#[tokio::test]
async fn test_swagger_disabled() {
    let app = create_test_app_with(ApiConfig {
        enable_swagger: false,
        ..Default::default()
    });

    let (status, _, _) = send(app, "GET", "/api-docs/openapi.json", None, Body::empty()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
