// recode - Gamified identity dashboard with AI vision coaching
//
// Serves a local JSON API for a single dashboard session: onboarding, a
// personal directive, AI-written vision and anti-vision, journal, dossier,
// quests, calendar and progress.
//
// Architecture:
// - Dashboard: session state machine behind a std mutex
// - AI gateway: Gemini calls with timeouts, lenient JSON parsing, fail-closed
// - Tracer: every AI call becomes a span, exported to Opik on its own task
// - Server (axum): JSON API, AI work runs on spawned tasks outside the lock

mod ai;
mod calendar;
mod cli;
mod config;
mod dashboard;
mod server;
mod startup;
mod store;
mod trace;

use anyhow::Result;
use chrono::Local;
use config::{Config, LogRotation, LoggingConfig};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// Precedence: RUST_LOG env var > config file > default "info". The returned
/// guard must be kept alive for file logs to flush.
fn init_tracing(logging: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("recode={},axum=info", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let mut guard = None;
    let file_layer = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let file_appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };

                // Writes happen on a background thread
                let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
                guard = Some(file_guard);

                // JSON for structured log parsing
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --path, --reset)
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    let _file_guard = init_tracing(&config.logging);

    // Tracing pipeline: local log always, Opik when a key is configured
    let sink = trace::create_sink(&config.opik);
    let tracer = trace::Tracer::new(sink, config.opik.channel_buffer);

    let generator = ai::create_generator(&config.ai);
    let gateway = ai::AiGateway::new(generator, tracer.clone(), &config.ai);

    let dashboard = dashboard::Dashboard::new(Local::now().naive_local(), StdRng::from_entropy());
    let state = server::AppState::new(dashboard, gateway);

    startup::print_startup(&config);
    startup::log_startup(&config);

    // Oneshot: the server stops accepting connections when signalled and
    // finishes requests already in progress
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let bind_addr = config.bind_addr;
    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(bind_addr, state, shutdown_rx).await {
            tracing::error!("Server error: {:#}", e);
        }
    });

    // A bind failure ends the server task before any signal arrives
    let server_exited = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            false
        }
        _ = &mut server_handle => true,
    };

    tracing::info!("Shutting down...");

    // If the send fails, the server has already stopped
    let _ = shutdown_tx.send(());
    if !server_exited {
        let _ = server_handle.await;
    }

    // Deliver spans still queued for the trace backend
    tracer.flush().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
