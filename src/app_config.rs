use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Active translation backend
    #[serde(default)]
    pub backend: BackendKind,

    /// DeepL backend settings
    #[serde(default)]
    pub deepl: DeepLConfig,

    /// Youdao backend settings
    #[serde(default)]
    pub youdao: YoudaoConfig,

    /// Maximum number of files processed concurrently
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Path of the persisted glossary
    #[serde(default = "default_glossary_path")]
    pub glossary_path: String,

    /// Path of the user protected-terms list
    #[serde(default = "default_protected_terms_path")]
    pub protected_terms_path: String,

    /// Path of the translation quality log
    #[serde(default = "default_quality_log_path")]
    pub quality_log_path: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    // @backend: DeepL
    #[default]
    Deepl,
    // @backend: Youdao
    Youdao,
}

impl BackendKind {
    // @returns: Capitalized backend name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Deepl => "DeepL",
            Self::Youdao => "Youdao",
        }
    }

    // @returns: Lowercase backend identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Deepl => "deepl".to_string(),
            Self::Youdao => "youdao".to_string(),
        }
    }
}

// Implement Display trait for BackendKind
impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for BackendKind
impl std::str::FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::Deepl),
            "youdao" => Ok(Self::Youdao),
            _ => Err(anyhow!("Invalid backend type: {}", s)),
        }
    }
}

/// DeepL service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeepLConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (the free and pro tiers use different hosts)
    #[serde(default = "default_deepl_endpoint")]
    pub endpoint: String,
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_deepl_endpoint(),
        }
    }
}

/// Youdao service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct YoudaoConfig {
    /// Application key issued by the Youdao console
    #[serde(default = "String::new")]
    pub app_key: String,

    /// Application secret used for request signing
    #[serde(default = "String::new")]
    pub app_secret: String,

    /// Service endpoint URL
    #[serde(default = "default_youdao_endpoint")]
    pub endpoint: String,
}

impl Default for YoudaoConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            app_secret: String::new(),
            endpoint: default_youdao_endpoint(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "EN".to_string()
}

fn default_target_language() -> String {
    "ZH".to_string()
}

fn default_max_workers() -> usize {
    4
}

fn default_glossary_path() -> String {
    "translation_glossary.json".to_string()
}

fn default_protected_terms_path() -> String {
    "protected_terms.json".to_string()
}

fn default_quality_log_path() -> String {
    "translation_quality_log.json".to_string()
}

fn default_deepl_endpoint() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_youdao_endpoint() -> String {
    "https://openapi.youdao.com/api".to_string()
}

/// Placeholder values shipped in the template config; they are never valid
const PLACEHOLDER_CREDENTIALS: [&str; 3] =
    ["YOUR_API_KEY_HERE", "YOUR_APP_KEY_HERE", "YOUR_APP_SECRET_HERE"];

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || PLACEHOLDER_CREDENTIALS.contains(&value)
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load a configuration, writing a default template when the file is
    /// missing so the user has something to fill in
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if FileManager::file_exists(&path) {
            return Self::from_file(path);
        }

        let config = Config::default();
        config.save(&path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.source_language.trim().is_empty() || self.target_language.trim().is_empty() {
            return Err(AppError::Config(
                "Source and target language codes must not be empty".to_string(),
            ));
        }

        if self.max_workers == 0 {
            return Err(AppError::Config(
                "max_workers must be at least 1".to_string(),
            ));
        }

        match self.backend {
            BackendKind::Deepl => {
                if is_placeholder(&self.deepl.api_key) {
                    return Err(AppError::Config(
                        "A DeepL API key is required for the deepl backend".to_string(),
                    ));
                }
            }
            BackendKind::Youdao => {
                if is_placeholder(&self.youdao.app_key) || is_placeholder(&self.youdao.app_secret)
                {
                    return Err(AppError::Config(
                        "Youdao app_key and app_secret are required for the youdao backend"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            backend: BackendKind::default(),
            deepl: DeepLConfig::default(),
            youdao: YoudaoConfig::default(),
            max_workers: default_max_workers(),
            glossary_path: default_glossary_path(),
            protected_terms_path: default_protected_terms_path(),
            quality_log_path: default_quality_log_path(),
            log_level: LogLevel::default(),
        }
    }
}
