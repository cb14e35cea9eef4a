// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the dashboard API server runs. Subcommands:
// - config --show: Display effective configuration
// - config --path: Print config file location
// - config --reset: Regenerate config file with defaults

use crate::config::{key_fingerprint, Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;

/// recode - identity-recoding dashboard with AI coaching
#[derive(Parser)]
#[command(name = "recode")]
#[command(version = VERSION)]
#[command(about = "Gamified identity dashboard with AI vision coaching", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                println!("Usage: recode config [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false, // No subcommand, run the server
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn describe_key(key: Option<&str>) -> String {
    match key {
        Some(key) => format!("set ({})", key_fingerprint(key)),
        None => "unset".to_string(),
    }
}

fn handle_config_show() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("bind_addr = {:?}", config.bind_addr.to_string());
    println!();
    println!("[ai]");
    println!("model = {:?}", config.ai.model);
    println!("api_base = {:?}", config.ai.api_base);
    println!("timeout_secs = {}", config.ai.timeout_secs);
    println!("evaluate = {}", config.ai.evaluate);
    println!("# api key: {}", describe_key(config.ai.api_key.as_deref()));
    println!();
    println!("[opik]");
    println!("enabled = {}", config.opik.enabled);
    println!("api_base = {:?}", config.opik.api_base);
    println!("project_name = {:?}", config.opik.project_name);
    if let Some(workspace) = &config.opik.workspace {
        println!("workspace = {:?}", workspace);
    }
    println!("channel_buffer = {}", config.opik.channel_buffer);
    println!("timeout_secs = {}", config.opik.timeout_secs);
    println!("# api key: {}", describe_key(config.opik.api_key.as_deref()));
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
