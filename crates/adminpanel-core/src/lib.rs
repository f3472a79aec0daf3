//! Core types, configuration and logging for the adminpanel console

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, LoggingConfig, RoleMatch};
pub use error::{Error, Result};
pub use types::{
    ChangePasswordRequest, DraftField, NewSubAdminDraft, PasswordChangeDraft, PasswordField,
    RegisterRequest, SUB_ADMIN_ROLE, Severity, SubAdmin,
};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns [`Error::Logging`] if a global subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if config.format == "json" {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}
