use anyhow::{Context, bail};
use scrub_core::{DEFAULT_LANGUAGE, Operator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for scrub (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub anonymizer: AnonymizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default = "default_true")]
    pub cors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    /// PaddleX OCR serving endpoint
    Paddle,
    /// Local `tesseract` binary
    Tesseract,
    /// URL input is rejected
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_ocr_engine")]
    pub engine: OcrEngineKind,

    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,

    /// Tesseract language pack (`-l`)
    #[serde(default = "default_ocr_language")]
    pub language: String,

    #[serde(default = "default_ocr_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PiiEngineKind {
    /// Pattern recognizers compiled into the binary
    Builtin,
    /// Presidio REST service
    Presidio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_pii_engine")]
    pub engine: PiiEngineKind,

    #[serde(default = "default_analyzer_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub score_threshold: f64,

    #[serde(default = "default_analyzer_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    #[serde(default = "default_pii_engine")]
    pub engine: PiiEngineKind,

    #[serde(default = "default_anonymizer_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub operator: Operator,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            cors: true,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: default_ocr_engine(),
            endpoint: default_ocr_endpoint(),
            language: default_ocr_language(),
            timeout_secs: default_ocr_timeout(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            engine: default_pii_engine(),
            endpoint: default_analyzer_endpoint(),
            language: default_language(),
            score_threshold: 0.0,
            timeout_secs: default_analyzer_timeout(),
        }
    }
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            engine: default_pii_engine(),
            endpoint: default_anonymizer_endpoint(),
            operator: Operator::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_ocr_engine() -> OcrEngineKind {
    OcrEngineKind::Paddle
}

fn default_ocr_endpoint() -> String {
    "http://127.0.0.1:8080/ocr".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_ocr_timeout() -> u64 {
    60
}

fn default_max_image_bytes() -> u64 {
    20 * 1024 * 1024
}

fn default_pii_engine() -> PiiEngineKind {
    PiiEngineKind::Builtin
}

fn default_analyzer_endpoint() -> String {
    "http://127.0.0.1:5002".to_string()
}

fn default_anonymizer_endpoint() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_analyzer_timeout() -> u64 {
    30
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Load and validate an explicit config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scrub", "scrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.scrub/config.toml")
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.server.max_body_bytes == 0 {
            bail!("server.max_body_bytes must be non-zero");
        }
        if self.ocr.timeout_secs == 0 {
            bail!("ocr.timeout_secs must be non-zero");
        }
        if self.ocr.max_image_bytes == 0 {
            bail!("ocr.max_image_bytes must be non-zero");
        }
        if self.analyzer.timeout_secs == 0 {
            bail!("analyzer.timeout_secs must be non-zero");
        }
        if !(0.0..=1.0).contains(&self.analyzer.score_threshold) {
            bail!(
                "analyzer.score_threshold must be within [0, 1], got {}",
                self.analyzer.score_threshold
            );
        }
        if self.analyzer.language != DEFAULT_LANGUAGE {
            bail!(
                "analyzer.language '{}' is not supported (only '{}')",
                self.analyzer.language,
                DEFAULT_LANGUAGE
            );
        }
        if self.ocr.engine == OcrEngineKind::Paddle {
            check_endpoint("ocr.endpoint", &self.ocr.endpoint)?;
        }
        if self.analyzer.engine == PiiEngineKind::Presidio {
            check_endpoint("analyzer.endpoint", &self.analyzer.endpoint)?;
        }
        if self.anonymizer.engine == PiiEngineKind::Presidio {
            check_endpoint("anonymizer.endpoint", &self.anonymizer.endpoint)?;
        }
        Ok(())
    }
}

fn check_endpoint(field: &str, endpoint: &str) -> anyhow::Result<()> {
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        bail!("{} must start with http:// or https://: {}", field, endpoint);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ocr.engine, OcrEngineKind::Paddle);
        assert_eq!(config.analyzer.language, "en");
        assert_eq!(config.anonymizer.operator, Operator::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.ocr.endpoint, config.ocr.endpoint);
        assert_eq!(parsed.anonymizer.operator, config.anonymizer.operator);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r##"
[server]
port = 8088

[ocr]
engine = "tesseract"

[anonymizer]
operator = { type = "mask", masking_char = "#", chars_to_mask = 4, from_end = true }
"##;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ocr.engine, OcrEngineKind::Tesseract);
        assert_eq!(config.ocr.timeout_secs, 60);
        assert_eq!(config.analyzer.engine, PiiEngineKind::Builtin);
        assert_eq!(
            config.anonymizer.operator,
            Operator::Mask {
                masking_char: '#',
                chars_to_mask: Some(4),
                from_end: true,
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.analyzer.language = "de".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analyzer.score_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analyzer.engine = PiiEngineKind::Presidio;
        config.analyzer.endpoint = "localhost:5002".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ocr.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_ocr_skips_endpoint_check() {
        let mut config = Config::default();
        config.ocr.engine = OcrEngineKind::Disabled;
        config.ocr.endpoint = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 9000;
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.port, 9000);
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analyzer]\nlanguage = \"fr\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
