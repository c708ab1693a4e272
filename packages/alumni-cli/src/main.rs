//! Command-line client for the alumni network API.

use alumni_client::ClientConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod context;
mod menu;

use context::AppContext;

const DEFAULT_LOG_FILTER: &str = "warn,alumni_client=info";

#[derive(Parser)]
#[command(name = "alumni")]
#[command(about = "Alumni network API client")]
#[command(version)]
struct Cli {
    /// API base URL (overrides ALUMNI_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Session file (overrides ALUMNI_SESSION_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    session_file: Option<PathBuf>,

    /// Log every request at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login, registration and verification
    #[command(subcommand)]
    Auth(cmd::auth::AuthCommand),

    /// Alumni profiles
    #[command(subcommand)]
    Profile(cmd::profile::ProfileCommand),

    /// Events and participation
    #[command(subcommand)]
    Events(cmd::events::EventsCommand),

    /// Moderation (administrators only)
    #[command(subcommand)]
    Admin(cmd::admin::AdminCommand),

    /// Inspect or clear the stored session
    #[command(subcommand)]
    Session(cmd::session::SessionCommand),

    /// Interactive menu over every operation
    Menu,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("info,alumni_client=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

/// Returns whether the command succeeded.
async fn run(cli: Cli) -> Result<bool> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(path) = cli.session_file {
        config = config.with_session_path(path);
    }

    debug!(
        base_url = %config.base_url,
        session_file = %config.session_path.display(),
        "Configuration resolved"
    );

    let ctx = AppContext::new(&config);

    match cli.command {
        Some(Commands::Auth(cmd)) => cmd::auth::run(&ctx, cmd).await,
        Some(Commands::Profile(cmd)) => cmd::profile::run(&ctx, cmd).await,
        Some(Commands::Events(cmd)) => cmd::events::run(&ctx, cmd).await,
        Some(Commands::Admin(cmd)) => cmd::admin::run(&ctx, cmd).await,
        Some(Commands::Session(cmd)) => cmd::session::run(&ctx, cmd),
        Some(Commands::Menu) | None => menu::run(&ctx).await,
    }
}
