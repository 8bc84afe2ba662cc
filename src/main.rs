//! Main entry point for the OneSky pull CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onesky_pull::cli;
use onesky_pull::core::config::PullConfig;
use onesky_pull::core::store::{KeychainStore, PrefsStore};

/// OneSky localization puller - downloads a project's translation files
#[derive(Parser, Debug)]
#[command(name = "onesky-pull", version, about, long_about = None)]
struct Args {
    /// API key (defaults to the keychain entry or ONESKY_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// API secret (defaults to the keychain entry or ONESKY_API_SECRET)
    #[arg(long)]
    api_secret: Option<String>,

    /// Project id (defaults to the saved preference or ONESKY_PROJECT_ID)
    #[arg(long)]
    project_id: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Override credential resolution with CLI args if provided
    if let Some(api_key) = args.api_key {
        std::env::set_var("ONESKY_API_KEY", api_key);
    }
    if let Some(api_secret) = args.api_secret {
        std::env::set_var("ONESKY_API_SECRET", api_secret);
    }
    if let Some(project_id) = args.project_id {
        std::env::set_var("ONESKY_PROJECT_ID", project_id);
    }

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("onesky_pull={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let secrets = KeychainStore::new();
    let prefs = PrefsStore::user_default()?;
    let config = PullConfig::resolve(&secrets, &prefs)?;

    cli::commands::handle_pull(config).await?;

    Ok(())
}
