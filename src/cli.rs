//! CLI definitions for dify-helper.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dify-helper CLI.
#[derive(Parser)]
#[command(name = "dify-helper")]
#[command(about = "Session-holding relay in front of the Dify console API")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server in foreground (default)
    Run {
        /// Server host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Log in and print apps and datasets
    Overview {
        #[arg(long, env = "DIFY_EMAIL")]
        email: String,

        #[arg(long, env = "DIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Send a chat message to an app and print the answer
    Chat {
        /// Message text
        query: String,

        /// App API key
        #[arg(long, env = "DIFY_APP_KEY", hide_env_values = true)]
        app_key: String,

        /// End-user identifier
        #[arg(long, default_value = "user")]
        user: String,

        /// Continue an existing conversation
        #[arg(long)]
        conversation_id: Option<String>,
    },

    /// Upload a document into a dataset
    Upload {
        /// Target dataset ID
        dataset_id: String,

        /// File to upload
        file: PathBuf,

        #[arg(long, env = "DIFY_EMAIL")]
        email: String,

        #[arg(long, env = "DIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Validate the configuration file
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["dify-helper"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from(["dify-helper", "run", "--port", "8088"]).unwrap();
        match cli.command {
            Some(Commands::Run { host, port }) => {
                assert!(host.is_none());
                assert_eq!(port, Some(8088));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_chat_arguments() {
        let cli = Cli::try_parse_from([
            "dify-helper",
            "chat",
            "Hello!",
            "--app-key",
            "app-123",
            "--conversation-id",
            "conv-1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Chat {
                query,
                app_key,
                user,
                conversation_id,
            }) => {
                assert_eq!(query, "Hello!");
                assert_eq!(app_key, "app-123");
                assert_eq!(user, "user");
                assert_eq!(conversation_id.as_deref(), Some("conv-1"));
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["dify-helper", "check", "--config", "/tmp/x.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.config, PathBuf::from("/tmp/x.toml"));
    }
}
