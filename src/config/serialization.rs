//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file. API keys are never written.
    pub fn to_toml(&self) -> String {
        let workspace = match &self.opik.workspace {
            Some(ws) => format!("workspace = \"{}\"\n", ws),
            None => "# workspace = \"my-team\"  # OPIK_WORKSPACE overrides\n".to_string(),
        };

        format!(
            r#"# recode configuration
#
# API keys are read from the environment only:
#   GEMINI_API_KEY (or API_KEY)  Gemini generateContent
#   OPIK_API_KEY                 Opik trace export

# Dashboard API bind address (RECODE_BIND overrides)
bind_addr = "{bind}"

# Generative-text endpoint
[ai]
model = "{model}"
api_base = "{ai_base}"
timeout_secs = {ai_timeout}
# Score vision and journal analysis calls with an LLM judge (doubles AI calls)
evaluate = {evaluate}

# Opik trace export (no-op without OPIK_API_KEY)
[opik]
enabled = {opik_enabled}
api_base = "{opik_base}"
project_name = "{project}"
{workspace}channel_buffer = {buffer}
timeout_secs = {opik_timeout}

# Logging configuration (RUST_LOG, then RECODE_LOG, override level)
[logging]
level = "{log_level}"
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            bind = self.bind_addr,
            model = self.ai.model,
            ai_base = self.ai.api_base,
            ai_timeout = self.ai.timeout_secs,
            evaluate = self.ai.evaluate,
            opik_enabled = self.opik.enabled,
            opik_base = self.opik.api_base,
            project = self.opik.project_name,
            workspace = workspace,
            buffer = self.opik.channel_buffer,
            opik_timeout = self.opik.timeout_secs,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
