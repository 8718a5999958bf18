//! dify-helper - session-holding relay for the Dify console API
//!
//! Main entry point for the dify-helper CLI and server.

mod cli;
mod cmd_check;
mod cmd_remote;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use dify_helper_config::{ConfigLoader, ConfigValidator};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Some(Commands::Check) = cli.command {
        return cmd_check::check(&cli.config);
    }

    let mut config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(Commands::Run { host, port }) = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    server::init_tracing(&config.logging)?;

    let validation = ConfigValidator::ensure_valid(&config)?;
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    match cli.command {
        None | Some(Commands::Run { .. }) => server::run_server(config).await,
        Some(Commands::Overview { email, password }) => {
            cmd_remote::overview(&config, &email, &password).await
        }
        Some(Commands::Chat {
            query,
            app_key,
            user,
            conversation_id,
        }) => cmd_remote::chat(&config, &app_key, &query, &user, conversation_id).await,
        Some(Commands::Upload {
            dataset_id,
            file,
            email,
            password,
        }) => cmd_remote::upload(&config, &email, &password, &dataset_id, &file).await,
        Some(Commands::Check) => cmd_check::check(&cli.config),
    }
}
