//! Logging setup and server startup for dify-helper.

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use dify_helper_api::{ApiServer, AppState, ServerConfig};
use dify_helper_config::{Config, ConfigLoader, LoggingConfig};

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the filter from `RUST_LOG`, else the configured level.
pub(crate) fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing with console and optional file output.
///
/// Log files rotate daily and the last 30 are kept.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if logging.json {
        layers.push(fmt::layer().json().with_target(true).boxed());
    } else {
        layers.push(fmt::layer().with_target(true).with_ansi(true).boxed());
    }

    if logging.file {
        let log_dir = ConfigLoader::log_dir(logging);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("dify-helper")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)
            .context("building log file appender")?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
        if logging.json {
            layers.push(file_layer.json().boxed());
        } else {
            layers.push(file_layer.boxed());
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(logging))
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

/// Run the HTTP server in foreground until Ctrl+C.
pub(crate) async fn run_server(config: Config) -> Result<()> {
    info!("Starting dify-helper v{}", env!("CARGO_PKG_VERSION"));
    info!("Remote console API: {}", config.remote.base_url);

    let state = Arc::new(AppState::new(config.remote.base_url.clone()));
    let server = ApiServer::new(ServerConfig::from(&config.server), state);

    server.run().await.map_err(|e| anyhow::anyhow!(e))
}
