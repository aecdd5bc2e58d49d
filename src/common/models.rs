// Wire models shared by the desktop console and the terminal client
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Body of `POST /scan`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRequest {
    pub code: String,
    pub language: String,
}

impl ScanRequest {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language: language.as_str().to_string(),
        }
    }
}

/// What the user handed to the console. A selected file always wins over pasted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    Code { code: String, language: Language },
    File { path: PathBuf },
}

impl ScanInput {
    /// Resolve the input from the raw console fields. Returns `None` when there is nothing to scan.
    pub fn resolve(code: &str, file: Option<&PathBuf>, language: Language) -> Option<Self> {
        if let Some(path) = file {
            return Some(ScanInput::File { path: path.clone() });
        }
        if code.trim().is_empty() {
            return None;
        }
        Some(ScanInput::Code {
            code: code.to_string(),
            language,
        })
    }

    /// Source text available for the annotated preview.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            ScanInput::Code { code, .. } => Some(code),
            ScanInput::File { .. } => None,
        }
    }
}

/// One finding reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub explanation: String,
    pub risk: String,
}

impl Warning {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::parse(&self.risk)
    }
}

/// Response of both `/scan` and `/scan-file`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub risk_score: u32,
    pub risk_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_warnings")]
    pub warnings: Vec<Warning>,
}

impl ScanResult {
    pub fn level(&self) -> RiskLevel {
        RiskLevel::parse(&self.risk_level)
    }
}

// Backends occasionally send floats or negative numbers for the score.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.round().min(u32::MAX as f64) as u32)
}

// `"warnings": null` is treated as no warnings
fn deserialize_warnings<'de, D>(deserializer: D) -> Result<Vec<Warning>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Warning>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Severity label returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
    Unknown(String),
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "safe" => RiskLevel::Safe,
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            "critical" => RiskLevel::Critical,
            other => RiskLevel::Unknown(other.to_string()),
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Unknown(_) => 0,
            RiskLevel::Safe => 1,
            RiskLevel::Low => 2,
            RiskLevel::Medium => 3,
            RiskLevel::High => 4,
            RiskLevel::Critical => 5,
        }
    }

    /// High and critical results get the attention animation.
    pub fn is_alarming(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    /// Fixed class name for styling; unrecognised levels all map to `unknown`.
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Unknown(raw) => write!(f, "{}", raw.to_uppercase()),
            known => write!(f, "{}", known.css_class().to_uppercase()),
        }
    }
}

/// Values of the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Auto,
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    CSharp,
    Go,
    Rust,
    Php,
    Ruby,
    Shell,
}

const ALL_LANGUAGES: [Language; 13] = [
    Language::Auto,
    Language::Python,
    Language::JavaScript,
    Language::TypeScript,
    Language::Java,
    Language::C,
    Language::Cpp,
    Language::CSharp,
    Language::Go,
    Language::Rust,
    Language::Php,
    Language::Ruby,
    Language::Shell,
];

impl Language {
    pub fn all() -> &'static [Language] {
        &ALL_LANGUAGES
    }

    /// Selector value sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Shell => "shell",
        }
    }

    /// Map a language name reported by the backend onto a selector value.
    /// `auto` is never a detection result.
    pub fn from_backend(raw: &str) -> Option<Language> {
        let lang = match raw.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Language::Python,
            "javascript" | "js" | "node" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" => Language::Cpp,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "go" | "golang" => Language::Go,
            "rust" | "rs" => Language::Rust,
            "php" => Language::Php,
            "ruby" | "rb" => Language::Ruby,
            "shell" | "bash" | "sh" | "zsh" => Language::Shell,
            _ => return None,
        };
        Some(lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Language::Auto => "Auto-detect",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Shell => "Shell",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Language::Auto);
        }
        Language::from_backend(s).ok_or_else(|| format!("unsupported language: {}", s))
    }
}
