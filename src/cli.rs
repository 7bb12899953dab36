//! Command-line interface definition for Kaiwatore
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the serve command and configuration overrides.

use clap::{Parser, Subcommand};

/// Kaiwatore - conversational practice backend
///
/// Serves the conversation practice HTTP API: in-character replies,
/// per-turn coaching feedback, and end-of-session impression summaries.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "kaiwatore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for Kaiwatore
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address override (e.g. 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Bind port override
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the provider from config (gemini, disabled)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Load and validate the configuration, then exit
    CheckConfig,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::parse_from(["kaiwatore", "serve", "--host", "0.0.0.0", "-p", "9000"]);
        match cli.command {
            Some(Commands::Serve { host, port, .. }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_defaults_to_no_command() {
        let cli = Cli::parse_from(["kaiwatore"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_check_config() {
        let cli = Cli::parse_from(["kaiwatore", "--config", "custom.yaml", "check-config"]);
        assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }
}
