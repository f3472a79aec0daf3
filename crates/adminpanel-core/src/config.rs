//! Configuration management for the adminpanel console

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Token storage configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Settings screen behaviour
    #[serde(default)]
    pub screen: ScreenConfig,

    /// Notification toast configuration
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Token storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Key the bearer token is stored under
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// File backing the persistent key-value store
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
}

/// How the list filter compares the role field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleMatch {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Trimmed, ASCII case-insensitive equality
    CaseInsensitive,
}

impl RoleMatch {
    /// Check whether `role` matches `expected` under this policy
    #[must_use]
    pub fn matches(self, role: &str, expected: &str) -> bool {
        match self {
            Self::Exact => role == expected,
            Self::CaseInsensitive => role.trim().eq_ignore_ascii_case(expected.trim()),
        }
    }
}

/// Settings screen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Role comparison policy for the sub-admin list
    #[serde(default)]
    pub role_match: RoleMatch,
}

/// Notification toast configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Delay before a shown notification hides itself, in milliseconds
    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_storage_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "adminpanel").map_or_else(
        || PathBuf::from(".adminpanel").join("storage.json"),
        |dirs| dirs.data_dir().join("storage.json"),
    )
}

const fn default_auto_hide_ms() -> u64 {
    6000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            storage_path: default_storage_path(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_hide_ms: default_auto_hide_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `adminpanel.toml` and the environment
    ///
    /// Environment variables use the `ADMINPANEL_` prefix and `__` between
    /// nested keys, e.g. `ADMINPANEL_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be parsed or a value
    /// has the wrong type
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("adminpanel").required(false))
            .add_source(env_source())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from an explicit TOML file, still honouring the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file does not exist or is not
    /// valid TOML, and an I/O error if it exists but cannot be read
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(crate::Error::configuration(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "loading configuration file");
        let contents = std::fs::read_to_string(path)?;

        let config = config::Config::builder()
            .add_source(config::File::from_str(&contents, config::FileFormat::Toml))
            .add_source(env_source())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check the values that would make every request fail
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending key
    pub fn validate(&self) -> crate::Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(crate::Error::validation(
                "api.base_url",
                format!("expected an http(s) URL, got '{base}'"),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(crate::Error::validation(
                "api.timeout_secs",
                "timeout must be greater than zero",
            ));
        }
        if self.auth.token_key.is_empty() {
            return Err(crate::Error::validation(
                "auth.token_key",
                "token key must not be empty",
            ));
        }
        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("ADMINPANEL")
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::field_reassign_with_default)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.auth.token_key, "token");
        assert!(config.auth.storage_path.ends_with("storage.json"));
        assert_eq!(config.screen.role_match, RoleMatch::Exact);
        assert_eq!(config.notification.auto_hide_ms, 6000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "api": {"base_url": "https://admin.example.com"},
            "screen": {"role_match": "case_insensitive"}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.api.timeout_secs, 10); // Uses default
        assert_eq!(config.screen.role_match, RoleMatch::CaseInsensitive);
        assert_eq!(config.auth.token_key, "token");
        assert_eq!(config.notification, NotificationConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://10.0.0.5:9000\"\ntimeout_secs = 3\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, crate::Error::Configuration { .. }));
    }

    #[test]
    fn test_from_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "localhost:8000".to_string();
        assert!(matches!(
            config.validate(),
            Err(crate::Error::Validation { ref field, .. }) if field == "api.base_url"
        ));

        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.auth.token_key.clear();
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case(RoleMatch::Exact, "sub admin", true)]
    #[case(RoleMatch::Exact, "Sub Admin", false)]
    #[case(RoleMatch::Exact, "sub admin ", false)]
    #[case(RoleMatch::Exact, "admin", false)]
    #[case(RoleMatch::CaseInsensitive, "Sub Admin", true)]
    #[case(RoleMatch::CaseInsensitive, " SUB ADMIN ", true)]
    #[case(RoleMatch::CaseInsensitive, "subadmin", false)]
    fn test_role_match(#[case] policy: RoleMatch, #[case] role: &str, #[case] expected: bool) {
        assert_eq!(policy.matches(role, "sub admin"), expected);
    }
}
