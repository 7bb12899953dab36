//! Kaiwatore - conversational practice backend
//!
#![doc = "Main entry point for the Kaiwatore server application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kaiwatore::cli::{Cli, Commands};
use kaiwatore::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command; a bare invocation serves
    match cli.command {
        Some(Commands::CheckConfig) => {
            tracing::info!("Configuration is valid");
            println!(
                "provider: {} (model: {})",
                config.provider.provider_type, config.provider.gemini.model
            );
            println!("server: {}:{}", config.server.host, config.server.port);
            Ok(())
        }
        Some(Commands::Serve { .. }) | None => {
            tracing::info!("Starting Kaiwatore server");
            kaiwatore::server::run(config).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "kaiwatore=debug"
    } else {
        "kaiwatore=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
