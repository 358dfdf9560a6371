//! # Main Entry Point
//!
//! Initializes the help bot:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix, Admin directory, HTTP help page
//! - Application: Catalog pipeline, Router
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::assembler::CatalogAssembler;
use crate::application::catalog::HelpCatalog;
use crate::application::render;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::infrastructure::admin::ConfigAdminDirectory;
use crate::infrastructure::matrix::MatrixService;
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "help-catalog", about = "Grouped help and command suggestions for a chat assistant")]
struct Cli {
    /// Path to the YAML configuration
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to Matrix and answer help requests (default)
    Serve,
    /// Print the rendered catalog to stdout
    Render {
        #[arg(long, value_enum, default_value_t = Format::Rich)]
        format: Format,
        /// Include admin-only commands
        #[arg(long)]
        admin: bool,
        /// Only list commands containing this text
        #[arg(long)]
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Rich,
    Html,
    Markdown,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let interactive = !matches!(cli.command, Some(Command::Render { .. }));
    let _guard = init_logging(interactive)?;
    tracing::info!("{}", logs::config_loaded(&cli.config.display().to_string()));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Render {
            format,
            admin,
            query,
        } => render_catalog(&config, format, admin, query.as_deref()),
    }
}

/// File log under `data/` always; console output on stdout when serving, stderr otherwise.
fn init_logging(interactive: bool) -> Result<WorkerGuard> {
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    let stdout_layer = interactive.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));
    let stderr_layer = (!interactive).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .with(stderr_layer)
        .init();

    Ok(guard)
}

fn render_catalog(config: &AppConfig, format: Format, admin: bool, query: Option<&str>) -> Result<()> {
    let catalog = HelpCatalog::from_config(config);
    let lines: Vec<String> = catalog
        .help_commands()?
        .into_iter()
        .filter(|line| application::markers::is_marker(line) || render::matches_query(line, query))
        .collect();
    let grouped = CatalogAssembler::new().assemble(&lines, admin)?;

    let output = match format {
        Format::Rich => serde_json::to_string_pretty(&render::rich(&grouped.map_lines(render::emphasize)))?,
        Format::Html => render::html(&grouped.flatten(), &config.bot.name, None),
        Format::Markdown => render::markdown(&grouped.flatten()),
    };
    println!("{output}");
    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    let matrix = config
        .services
        .matrix
        .clone()
        .context("services.matrix is required to serve")?;

    // 3. Initialize Application Components
    let catalog = Arc::new(HelpCatalog::from_config(&config));
    let admins = Arc::new(ConfigAdminDirectory::new(config.system.admin.clone()));

    if !config.help.disable_http {
        let http_catalog = catalog.clone();
        let bind = config.http.bind.clone();
        let bot_name = config.bot.name.clone();
        tokio::spawn(async move {
            if let Err(e) = infrastructure::http::serve(&bind, http_catalog, &bot_name).await {
                tracing::error!("{}", logs::http_fail(&format!("{e:#}")));
            }
        });
    }

    let router = Arc::new(CommandRouter::new(config.clone(), catalog, admins));

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password)
        .send()
        .await?;

    tracing::info!("{}", logs::logged_in(&matrix.username));

    if let Some(name) = &matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room, client: Client| {
        let router = router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time = std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            if original_msg.sender == room.own_user_id() {
                return;
            }

            if let MessageType::Text(text_content) = &original_msg.content.msgtype {
                tracing::info!("Received message from {}: \n{}", original_msg.sender, text_content.body);
                let chat = MatrixService::new(room, client);
                if let Err(e) = router
                    .route(&chat, &text_content.body, original_msg.sender.as_str())
                    .await
                {
                    tracing::error!("Failed to route message: {:#}", e);
                }
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::error!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // 6. Start Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
