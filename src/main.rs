//! AutoApply - job application auto-filler
//!
//! Main entry point for the AutoApply CLI and message endpoint.

mod cli;
mod pages;
mod profiles;
mod server;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autoapply_config::{Config, ConfigLoader};
use autoapply_core::{AdapterRegistry, AutoApplyBridge, PipelineSettings, detect_from_url, registry};
use autoapply_protocols::RuntimeMessage;

use cli::{Cli, Commands};
use pages::{CdpPageSource, PageSource};

fn autoapply_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".autoapply"))
        .unwrap_or_else(|| PathBuf::from(".autoapply"))
}

/// Initialize tracing with console and file output.
///
/// Log files go to ~/.autoapply/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = autoapply_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("autoapply")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(ConfigLoader::default_path);
    let config = ConfigLoader::load_validated(&path)
        .map_err(|e| format!("invalid configuration in {}: {}", path.display(), e))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = load_config(cli.config)?;

    match cli.command {
        Commands::Boards { json } => list_boards(json),
        Commands::Detect { url } => {
            match detect_from_url(&url) {
                Some(board) => println!("{}", board),
                None => println!("unknown"),
            }
            Ok(())
        }
        Commands::Apply {
            url,
            target,
            profile,
            browser,
        } => {
            if let Some(endpoint) = browser {
                config.browser.endpoint = endpoint;
            }
            apply(&config, url, target, profile).await
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            server::run_server(config, host, port).await
        }
    }
}

fn list_boards(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let adapters = AdapterRegistry::with_defaults();

    if json {
        let table: serde_json::Map<String, serde_json::Value> = registry::all()
            .map(|(board, selectors)| Ok((board.to_string(), serde_json::to_value(selectors)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{:<16} {:<12} APPLY BUTTON", "BOARD", "ADAPTER");
    for (board, selectors) in registry::all() {
        println!(
            "{:<16} {:<12} {}",
            board,
            adapters.get(board).name(),
            selectors.apply_button
        );
    }
    Ok(())
}

async fn apply(
    config: &Config,
    url: Option<String>,
    target: Option<String>,
    profile: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = profiles::store_for(config, profile.as_deref())?;
    let profile = store.load().await?;
    info!("Loaded profile from {} store", store.name());

    let pages = CdpPageSource::new(config.browser.endpoint.clone());
    let opened = pages.open(target.as_deref(), url.as_deref()).await?;

    let bridge = AutoApplyBridge::new(PipelineSettings::from_config(config));
    let response = bridge
        .handle(opened.page(), RuntimeMessage::auto_apply(profile))
        .await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_success() {
        Ok(())
    } else {
        Err(response
            .message
            .unwrap_or_else(|| "auto-apply failed".to_string())
            .into())
    }
}
