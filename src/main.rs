mod common;
mod config;
mod grouping;
mod network;
mod storage;
mod ui;
mod validation;

use std::error::Error;
use std::path::Path;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use network::{ApiClient, AuthGateway, GatewayWorker, MessageGateway};
use storage::{SessionStore, SqliteStore};
use tokio::sync::mpsc;
use ui::{ChatApp, Presentation};

#[derive(Parser)]
#[command(name = "chatterbox", version, about = "Desktop client for the Chatterbox chat API")]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base URL of the chat API (overrides config and environment)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Forget the stored session and exit
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    if !Path::new(&cli.config).exists() {
        match config::save_config(&cli.config, &config::AppConfig::default()) {
            Ok(()) => log::info!("Wrote default config to {}", cli.config),
            Err(err) => log::warn!("Unable to create {}: {err}", cli.config),
        }
    }
    let app_config = config::load_config(&cli.config)
        .with_overrides(std::env::var(config::API_URL_ENV).ok(), cli.api_url);

    storage::ensure_parent_dir(&app_config.session_db)?;
    let mut sessions = SessionStore::open(SqliteStore::open(&app_config.session_db)?);

    if cli.command == Some(Command::Logout) {
        sessions.logout()?;
        log::info!("Stored session cleared");
        return Ok(());
    }

    match sessions.session()? {
        Some(session) => log::info!("Resuming session for {}", session.user.username),
        None => log::info!("No stored session; login required"),
    }

    run_client(app_config, sessions).await?;
    Ok(())
}

async fn run_client(
    app_config: config::AppConfig,
    sessions: SessionStore<SqliteStore>,
) -> Result<(), Box<dyn Error>> {
    let api = ApiClient::new(&app_config.api_base_url, app_config.request_timeout())?;
    log::info!("Using chat API at {}", api.base_url());

    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let user_rx = sessions.subscribe();
    let worker = GatewayWorker::new(
        event_tx,
        cmd_rx,
        AuthGateway::new(api.clone()),
        MessageGateway::new(api),
        sessions,
    );
    tokio::spawn(worker.run());

    let presentation = Presentation {
        threshold: app_config.timestamp_threshold(),
        locale: app_config.locale,
    };
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Chatterbox",
        options,
        Box::new(move |cc| {
            Ok(Box::new(ChatApp::new(
                cc,
                cmd_tx,
                event_rx,
                user_rx,
                presentation,
            )))
        }),
    )?;
    Ok(())
}
