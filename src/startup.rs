// Startup module - displays banner and module status
//
// Printed to stdout before the server starts, and mirrored into the log so
// file logs record what a run was configured with.

use crate::config::{key_fingerprint, Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module status for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

/// Print the startup banner and module status
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}recode{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Identity dashboard with AI vision coaching{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Loading modules...{RESET}");
    for module in &get_module_status(config) {
        print_module_status(module);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} API listening on {BOLD}http://{}{RESET}",
        config.bind_addr
    );
    if !config.ai.is_configured() {
        println!(
            "  {YELLOW}▸{RESET} {YELLOW}No GEMINI_API_KEY{RESET} {DIM}(AI features return empty results){RESET}"
        );
    }
    println!();
}

/// Mirror the module status into the log
pub fn log_startup(config: &Config) {
    tracing::info!("recode v{} starting", VERSION);
    for module in &get_module_status(config) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }
    tracing::info!("▸ Listening on {}", config.bind_addr);
}

fn get_module_status(config: &Config) -> Vec<ModuleStatus> {
    let gemini = match &config.ai.api_key {
        Some(key) => format!("{} (key {})", config.ai.model, key_fingerprint(key)),
        None => "no API key".to_string(),
    };

    let opik = match &config.opik.api_key {
        Some(key) if config.opik.enabled => format!(
            "project {} (key {})",
            config.opik.project_name,
            key_fingerprint(key)
        ),
        _ if !config.opik.enabled => "disabled, local metrics only".to_string(),
        _ => "no API key, local metrics only".to_string(),
    };

    vec![
        ModuleStatus {
            name: "dashboard",
            enabled: true, // Core, always on
            description: "Session state & JSON API".to_string(),
        },
        ModuleStatus {
            name: "gemini",
            enabled: config.ai.is_configured(),
            description: gemini,
        },
        ModuleStatus {
            name: "opik",
            enabled: config.opik.is_configured(),
            description: opik,
        },
        ModuleStatus {
            name: "evaluators",
            enabled: config.ai.evaluate,
            description: "LLM-as-judge scoring".to_string(),
        },
        ModuleStatus {
            name: "file-logs",
            enabled: config.logging.file_enabled,
            description: config.logging.file_dir.display().to_string(),
        },
    ]
}

fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_status_never_shows_raw_keys() {
        let mut config = Config::default();
        config.ai.api_key = Some("gemini-secret".to_string());
        config.opik.api_key = Some("opik-secret".to_string());

        let modules = get_module_status(&config);
        assert!(modules.iter().all(|m| !m.description.contains("secret")));
        assert!(modules.iter().any(|m| m.name == "opik" && m.enabled));
    }

    #[test]
    fn test_opik_without_key_is_local_only() {
        let modules = get_module_status(&Config::default());
        let opik = modules.iter().find(|m| m.name == "opik").unwrap();
        assert!(!opik.enabled);
        assert!(opik.description.contains("local metrics"));
    }
}
