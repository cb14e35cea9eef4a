//! Observability configuration: logging and Opik trace export

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Log Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// Single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config, unknown values fall back to daily
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable JSON file logging in addition to stdout
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "recode" -> "recode.2024-06-15")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "recode".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::parse(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Opik Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Opik trace export configuration
#[derive(Debug, Clone)]
pub struct OpikConfig {
    /// Export spans when an API key is available
    pub enabled: bool,
    pub api_base: String,
    pub project_name: String,
    /// Comet workspace (OPIK_WORKSPACE overrides)
    pub workspace: Option<String>,
    /// From OPIK_API_KEY only
    pub api_key: Option<String>,
    /// Exporter queue depth before spans are dropped
    pub channel_buffer: usize,
    pub timeout_secs: u64,
}

impl Default for OpikConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: "https://www.comet.com/opik/api".to_string(),
            project_name: "recode-identity".to_string(),
            workspace: None,
            api_key: None,
            channel_buffer: 256,
            timeout_secs: 10,
        }
    }
}

impl OpikConfig {
    /// Export is enabled and a key is present
    pub fn is_configured(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }
}

/// Opik settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileOpik {
    pub enabled: Option<bool>,
    pub api_base: Option<String>,
    pub project_name: Option<String>,
    pub workspace: Option<String>,
    pub channel_buffer: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl OpikConfig {
    /// Create from file config with defaults
    /// Note: api_key and the workspace override come from the environment
    pub fn from_file(
        file: Option<FileOpik>,
        api_key: Option<String>,
        workspace_override: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: file.enabled.unwrap_or(defaults.enabled),
            api_base: file.api_base.unwrap_or(defaults.api_base),
            project_name: file.project_name.unwrap_or(defaults.project_name),
            workspace: workspace_override.or(file.workspace),
            api_key,
            channel_buffer: file.channel_buffer.unwrap_or(defaults.channel_buffer).max(1),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs).max(1),
        }
    }
}
