//! Admin settings console
//!
//! Lists, adds and deletes sub-admins and changes the signed-in admin's
//! password against the admin REST API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use adminpanel_client::ApiClient;
use adminpanel_core::{Config, DraftField, NewSubAdminDraft, PasswordChangeDraft, PasswordField};
use adminpanel_settings::console::{Action, build_screen, build_session, run_action};
use adminpanel_settings::view::{render_notification, render_table};
use adminpanel_settings::{Outcome, SettingsScreen};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Command line interface for the admin settings console
#[derive(Parser)]
#[command(
    name = "adminpanel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage sub-admins and change your admin password",
    long_about = "Admin settings console: lists, adds and deletes sub-admin accounts and changes the signed-in admin's password through the admin REST API."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Bearer token for this invocation only (not persisted)
    #[arg(long, value_name = "TOKEN", env = "ADMINPANEL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// List sub-admins
    List,

    /// Add a sub-admin
    Add {
        /// Login name
        #[arg(long)]
        username: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Initial password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        full_name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },

    /// Delete a sub-admin by ID
    Delete {
        /// Sub-admin ID
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Change your own password
    ChangePassword {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,

        /// New password again
        #[arg(long)]
        confirm: String,
    },

    /// Manage the persisted bearer token
    Token {
        /// Token subcommand
        #[command(subcommand)]
        action: TokenCommands,
    },

    /// Inspect configuration
    Config {
        /// Configuration subcommand
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Token management commands
#[derive(Subcommand)]
enum TokenCommands {
    /// Store a token for later invocations
    Set {
        /// Bearer token
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Remove the stored token
    Clear,

    /// Report whether a token is stored
    Show,
}

/// Configuration commands
#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration as TOML
    Show,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if it exists (for development convenience)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    adminpanel_core::init_logging(&config.logging).context("failed to initialise logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "adminpanel starting"
    );

    match cli.command {
        Commands::Token { action } => handle_token_command(&config, action).await,
        Commands::Config {
            action: ConfigCommands::Show,
        } => show_config(&config),
        command => run_screen_command(&config, cli.token.as_deref(), command).await,
    }
}

/// Resolve configuration from the file or environment plus CLI overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config_file(path)?,
        None => Config::load().context("failed to load configuration")?,
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<Config> {
    Config::from_file(path)
        .with_context(|| format!("failed to load config file {}", path.display()))
}

/// Run one screen action and print its result
async fn run_screen_command(
    config: &Config,
    token: Option<&str>,
    command: Commands,
) -> Result<ExitCode> {
    let action = match command {
        Commands::List => Action::List,
        Commands::Add {
            username,
            email,
            password,
            full_name,
            phone,
        } => Action::Add(
            NewSubAdminDraft::default()
                .with(DraftField::Username, username)
                .with(DraftField::Email, email)
                .with(DraftField::Password, password)
                .with(DraftField::FullName, full_name)
                .with(DraftField::PhoneNo, phone),
        ),
        Commands::Delete { id } => Action::Delete(id),
        Commands::ChangePassword {
            current,
            new,
            confirm,
        } => Action::ChangePassword(
            PasswordChangeDraft::default()
                .with(PasswordField::Current, current)
                .with(PasswordField::New, new)
                .with(PasswordField::Confirm, confirm),
        ),
        Commands::Token { .. } | Commands::Config { .. } => return Ok(ExitCode::SUCCESS),
    };

    let session = build_session(config, token);
    let mut screen = build_screen(config, session).context("failed to build API client")?;

    let show_table = action.shows_list();
    let outcome = run_action(&mut screen, action).await;

    print_screen(&screen, outcome, show_table);
    Ok(exit_code(outcome))
}

fn print_screen(screen: &SettingsScreen<ApiClient>, outcome: Outcome, show_table: bool) {
    if let Some(line) = render_notification(screen.notification()) {
        if outcome.is_success() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    if show_table {
        print!("{}", render_table(screen.sub_admins()));
    }
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Succeeded => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
        Outcome::Rejected => ExitCode::from(2),
    }
}

/// Handle token management commands
async fn handle_token_command(config: &Config, action: TokenCommands) -> Result<ExitCode> {
    let session = build_session(config, None);

    match action {
        TokenCommands::Set { token } => {
            session
                .store_token(token.trim())
                .await
                .context("failed to store token")?;
            info!(path = %config.auth.storage_path.display(), "token stored");
            println!("Token stored in {}", config.auth.storage_path.display());
        }
        TokenCommands::Clear => {
            session.clear_token().await.context("failed to clear token")?;
            info!(path = %config.auth.storage_path.display(), "token cleared");
            println!("Token cleared");
        }
        TokenCommands::Show => {
            if session.bearer_token().await.is_some() {
                println!("A token is stored under '{}'", session.token_key());
            } else {
                println!("No token stored");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Show configuration as TOML
fn show_config(config: &Config) -> Result<ExitCode> {
    let config_toml =
        toml::to_string_pretty(config).context("failed to serialize configuration")?;
    println!("{config_toml}");
    Ok(ExitCode::SUCCESS)
}
