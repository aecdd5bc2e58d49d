use crate::client::config::ClientConfig;
use crate::client::error::ScanError;
use crate::common::models::{Language, ScanRequest, ScanResult};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote scanning service, seen as an opaque black box.
pub trait ScanBackend: Send + Sync {
    /// `POST /scan` with pasted code, bounded by the scan timeout.
    fn scan_code<'a>(&'a self, request: &'a ScanRequest) -> BoxFuture<'a, Result<ScanResult, ScanError>>;

    /// `POST /scan-file` with a multipart `file` field, bounded by the scan timeout.
    fn scan_file<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<ScanResult, ScanError>>;

    /// Preview call used by auto-detect. Returns the language the backend recognised, if any.
    fn detect_language<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<String>, ScanError>>;
}

/// Only the field auto-detect cares about; the rest of the body is ignored.
#[derive(Debug, Deserialize)]
struct LanguagePreview {
    #[serde(default)]
    language: Option<String>,
}

pub struct HttpScanBackend {
    client: Client,
    scan_url: String,
    scan_file_url: String,
    timeout: Duration,
}

impl HttpScanBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ScanError> {
        config.validate().map_err(ScanError::Config)?;
        let client = Client::builder()
            .user_agent(concat!("phoenix-scan-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            scan_url: config.scan_url.clone(),
            scan_file_url: config.scan_file_url.clone(),
            timeout: config.scan_timeout,
        })
    }

    async fn post_code(&self, request: &ScanRequest) -> Result<ScanResult, ScanError> {
        log::debug!("POST {} ({} bytes, language={})", self.scan_url, request.code.len(), request.language);
        let response = self
            .client
            .post(&self.scan_url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ScanError::from)?;

        if !response.status().is_success() {
            log::warn!("Scan API returned {}", response.status());
            return Err(ScanError::Api("Scan API failed", response.status()));
        }

        response.json::<ScanResult>().await.map_err(ScanError::from)
    }

    async fn post_file(&self, path: &Path) -> Result<ScanResult, ScanError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ScanError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        log::debug!("POST {} (file {}, {} bytes)", self.scan_file_url, file_name, bytes.len());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(&self.scan_file_url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ScanError::from)?;

        if !response.status().is_success() {
            log::warn!("File scan API returned {}", response.status());
            return Err(ScanError::Api("File scan API failed", response.status()));
        }

        response.json::<ScanResult>().await.map_err(ScanError::from)
    }

    async fn post_preview(&self, code: &str) -> Result<Option<String>, ScanError> {
        let request = ScanRequest::new(code, Language::Auto);
        // no explicit timeout: the preview only drives a cosmetic selector
        let response = self
            .client
            .post(&self.scan_url)
            .json(&request)
            .send()
            .await
            .map_err(ScanError::from)?;

        if !response.status().is_success() {
            return Err(ScanError::Api("Scan API failed", response.status()));
        }

        let preview: LanguagePreview = response.json().await.map_err(ScanError::from)?;
        Ok(preview.language.filter(|l| !l.trim().is_empty()))
    }
}

impl ScanBackend for HttpScanBackend {
    fn scan_code<'a>(&'a self, request: &'a ScanRequest) -> BoxFuture<'a, Result<ScanResult, ScanError>> {
        Box::pin(self.post_code(request))
    }

    fn scan_file<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<ScanResult, ScanError>> {
        Box::pin(self.post_file(path))
    }

    fn detect_language<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<String>, ScanError>> {
        Box::pin(self.post_preview(code))
    }
}
