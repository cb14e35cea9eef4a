//! Generative-text endpoint configuration

use serde::Deserialize;

/// Gemini endpoint settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Model used for every call, judges included
    pub model: String,
    /// Base URL of the Generative Language API
    pub api_base: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Run the judge evaluators after successful calls
    pub evaluate: bool,
    /// From GEMINI_API_KEY / API_KEY only
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
            evaluate: false, // Doubles AI calls, opt-in
            api_key: None,
        }
    }
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// AI settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileAi {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub evaluate: Option<bool>,
}

impl AiConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileAi>, api_key: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            model: file.model.unwrap_or(defaults.model),
            api_base: file.api_base.unwrap_or(defaults.api_base),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs).max(1),
            evaluate: file.evaluate.unwrap_or(defaults.evaluate),
            api_key,
        }
    }
}
