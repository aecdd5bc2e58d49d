use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Hint shown under every scan error in the console.
pub const RETRY_HINT: &str = "💡 Free backend may sleep after inactivity.";

#[derive(Debug, Error)]
pub enum ScanError {
    /// The request hit the scan timeout; free-tier backends sleep when idle.
    #[error("Backend was sleeping. Please retry.")]
    BackendAsleep,

    #[error("{0}")]
    Api(&'static str, StatusCode),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected response from scan API: {0}")]
    Decode(String),

    #[error("Cannot read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Text shown to the user in the status bar.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ScanError::BackendAsleep)
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScanError::BackendAsleep
        } else if e.is_decode() {
            ScanError::Decode(e.to_string())
        } else {
            ScanError::Transport(e)
        }
    }
}
