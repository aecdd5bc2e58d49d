#![allow(dead_code)]

use phoenix_scan_console::client::config::ClientConfig;
use phoenix_scan_console::client::models::report::ScanReport;
use phoenix_scan_console::client::services::scan_console::ScanView;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

/// Records every controller call so tests can assert on the sequence.
#[derive(Default)]
pub struct RecordingView {
    pub events: Vec<String>,
    pub errors: Vec<String>,
    pub reports: Vec<ScanReport>,
    pub scan_enabled: Option<bool>,
}

impl ScanView for RecordingView {
    fn reset_results(&mut self) {
        self.events.push("reset".into());
    }

    fn show_status(&mut self, message: &str) {
        self.events.push(format!("status:{}", message));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push("error".into());
        self.errors.push(message.to_string());
    }

    fn shake_input(&mut self) {
        self.events.push("shake".into());
    }

    fn set_scan_enabled(&mut self, enabled: bool) {
        self.events.push(format!("enabled:{}", enabled));
        self.scan_enabled = Some(enabled);
    }

    fn render_result(&mut self, report: &ScanReport) {
        self.events.push("render".into());
        self.reports.push(report.clone());
    }
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default().with_base_url(&server.uri());
    config.scan_timeout = Duration::from_secs(5);
    config
}

pub fn critical_eval_body() -> Value {
    json!({
        "risk_score": 92,
        "risk_level": "CRITICAL",
        "language": "python",
        "warnings": [{
            "line": 1,
            "code": "eval(x)",
            "category": "Code Injection",
            "explanation": "eval executes arbitrary code",
            "risk": "critical"
        }]
    })
}

pub fn safe_body() -> Value {
    json!({
        "risk_score": 0,
        "risk_level": "SAFE",
        "language": "python",
        "warnings": []
    })
}
