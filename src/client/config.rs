use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SCAN_URL: &str = "https://phoenixaiscan-backend.onrender.com/scan";
pub const DEFAULT_SCAN_FILE_URL: &str = "https://phoenixaiscan-backend.onrender.com/scan-file";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MIN_DETECT_CHARS: usize = 5;
pub const DEFAULT_IDLE_MS: u64 = 500;
pub const DEFAULT_PASTE_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub scan_url: String,
    pub scan_file_url: String,
    pub scan_timeout: Duration,
    pub auto_detect_min_chars: usize,
    pub auto_detect_idle: Duration,
    pub auto_detect_paste: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scan_url: DEFAULT_SCAN_URL.to_string(),
            scan_file_url: DEFAULT_SCAN_FILE_URL.to_string(),
            scan_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auto_detect_min_chars: DEFAULT_MIN_DETECT_CHARS,
            auto_detect_idle: Duration::from_millis(DEFAULT_IDLE_MS),
            auto_detect_paste: Duration::from_millis(DEFAULT_PASTE_MS),
        }
    }
}

impl ClientConfig {
    /// Read the process environment. Binaries load `.env` with dotenvy before calling this.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup; invalid values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let url_or = |key: &str, fallback: &str| match lookup(key) {
            Some(v) if is_http_url(&v) => v,
            Some(v) => {
                log::warn!("Ignoring {}={:?}: not an http(s) URL", key, v);
                fallback.to_string()
            }
            None => fallback.to_string(),
        };
        let positive = |key: &str, fallback: u64| match lookup(key).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(n)) if n > 0 => n,
            Some(_) => {
                log::warn!("Ignoring {}: expected a positive integer", key);
                fallback
            }
            None => fallback,
        };

        Self {
            scan_url: url_or("SCAN_API_URL", &defaults.scan_url),
            scan_file_url: url_or("SCAN_FILE_API_URL", &defaults.scan_file_url),
            scan_timeout: Duration::from_secs(positive("SCAN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            auto_detect_min_chars: positive("AUTO_DETECT_MIN_CHARS", DEFAULT_MIN_DETECT_CHARS as u64) as usize,
            auto_detect_idle: Duration::from_millis(positive("AUTO_DETECT_IDLE_MS", DEFAULT_IDLE_MS)),
            auto_detect_paste: Duration::from_millis(positive("AUTO_DETECT_PASTE_MS", DEFAULT_PASTE_MS)),
        }
    }

    /// Point both endpoints at another base URL (used by tests and self-hosted backends).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.scan_url = format!("{}/scan", base);
        self.scan_file_url = format!("{}/scan-file", base);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("scan_url", &self.scan_url), ("scan_file_url", &self.scan_file_url)] {
            if !is_http_url(value) {
                return Err(format!("{} is not an http(s) URL: {}", name, value));
            }
        }
        if self.scan_timeout.is_zero() {
            return Err("scan_timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw.trim())
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_hosted_backend() {
        let cfg = ClientConfig::from_lookup(|_| None);
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.scan_timeout, Duration::from_secs(60));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("SCAN_API_URL", "http://localhost:8000/scan"),
            ("SCAN_TIMEOUT_SECS", "5"),
            ("AUTO_DETECT_IDLE_MS", "250"),
        ]));
        assert_eq!(cfg.scan_url, "http://localhost:8000/scan");
        assert_eq!(cfg.scan_file_url, DEFAULT_SCAN_FILE_URL);
        assert_eq!(cfg.scan_timeout, Duration::from_secs(5));
        assert_eq!(cfg.auto_detect_idle, Duration::from_millis(250));
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("SCAN_API_URL", "ftp://nope"),
            ("SCAN_TIMEOUT_SECS", "0"),
            ("AUTO_DETECT_MIN_CHARS", "many"),
        ]));
        assert_eq!(cfg.scan_url, DEFAULT_SCAN_URL);
        assert_eq!(cfg.scan_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.auto_detect_min_chars, DEFAULT_MIN_DETECT_CHARS);
    }

    #[test]
    fn base_url_rewrites_both_endpoints() {
        let cfg = ClientConfig::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(cfg.scan_url, "http://127.0.0.1:9000/scan");
        assert_eq!(cfg.scan_file_url, "http://127.0.0.1:9000/scan-file");
    }

    #[test]
    fn from_env_reads_the_process_environment() {
        // the only test touching the real environment
        env::set_var("AUTO_DETECT_PASTE_MS", "150");
        let cfg = ClientConfig::from_env();
        env::remove_var("AUTO_DETECT_PASTE_MS");
        assert_eq!(cfg.auto_detect_paste, Duration::from_millis(150));
    }
}
