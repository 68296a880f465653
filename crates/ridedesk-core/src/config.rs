//! Configuration management for ridedesk

use crate::session::{ADMIN_ID_KEY, ADMIN_NAME_KEY, ADMIN_PHONE_KEY, SessionStore};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Environment variable prefix for overrides (`RIDEDESK_API__BASE_URL`, ...)
pub const ENV_PREFIX: &str = "RIDEDESK";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ridedesk";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Admin service configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// List view configuration
    #[serde(default)]
    pub view: ViewConfig,

    /// Post-action synchronization
    #[serde(default)]
    pub sync: SyncConfig,

    /// Operator identity (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<OperatorConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Base URL of the admin service
    #[serde(default = "default_base_url")]
    #[validate(url(message = "must be an absolute URL"))]
    pub base_url: String,

    /// Origin that serves relative photo paths
    #[serde(default = "default_file_base_url")]
    #[validate(url(message = "must be an absolute URL"))]
    pub file_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,

    /// API key sent as `X-API-Key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// List view configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewConfig {
    /// Rows per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
    pub page_size: usize,
}

/// Post-action synchronization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Reload the full list after a mutating action
    #[serde(default = "default_reconcile_after_action")]
    pub reconcile_after_action: bool,
}

/// Operator identity held in configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OperatorConfig {
    /// Operator identifier
    #[serde(default)]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Contact phone
    #[serde(default)]
    pub phone: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
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
    "http://localhost:8080".to_string()
}

fn default_file_base_url() -> String {
    "http://localhost:8085".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_page_size() -> usize {
    10
}

const fn default_reconcile_after_action() -> bool {
    true
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
            file_base_url: default_file_base_url(),
            request_timeout_secs: default_request_timeout(),
            api_key: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reconcile_after_action: default_reconcile_after_action(),
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

impl SessionStore for OperatorConfig {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            ADMIN_ID_KEY => Some(self.id.clone()),
            ADMIN_NAME_KEY => Some(self.name.clone()),
            ADMIN_PHONE_KEY => Some(self.phone.clone()),
            _ => None,
        }
    }
}

impl ViewConfig {
    /// Page size as a non-zero value
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the page size is zero.
    pub fn page_size(&self) -> crate::Result<NonZeroUsize> {
        NonZeroUsize::new(self.page_size).ok_or_else(|| crate::Error::Configuration {
            message: "view.page_size must be at least 1".to_string(),
        })
    }
}

impl Config {
    /// Load configuration from `ridedesk.toml` (optional) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file when given
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `path` is missing, or if the merged
    /// configuration cannot be parsed or validated.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(PathBuf::from(path)).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        tracing::debug!(
            base_url = %config.api.base_url,
            page_size = config.view.page_size,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns the first validation failure as [`crate::Error::Validation`].
    pub fn validate(&self) -> crate::Result<()> {
        Validate::validate(&self.api)?;
        Validate::validate(&self.view)?;
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(crate::Error::validation(
                "format",
                format!("unknown log format '{}'", self.logging.format),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Operator;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.file_base_url, "http://localhost:8085");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.api.api_key.is_none());
        assert_eq!(config.view.page_size, 10);
        assert!(config.sync.reconcile_after_action);
        assert!(config.operator.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "api": {"base_url": "https://admin.example.com"},
            "view": {}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.api.file_base_url, "http://localhost:8085");
        assert_eq!(config.view.page_size, 10);
        assert!(config.sync.reconcile_after_action);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.view.page_size = 0;

        assert!(config.view.page_size().is_err());
        assert!(matches!(
            config.validate(),
            Err(crate::Error::Validation { ref field, .. }) if field == "page_size"
        ));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();

        assert!(matches!(
            config.validate(),
            Err(crate::Error::Validation { ref field, .. }) if field == "base_url"
        ));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://10.0.0.5:9000"
file_base_url = "http://10.0.0.5:8085"

[view]
page_size = 25

[sync]
reconcile_after_action = false

[operator]
id = "ops-1"
name = "Ravi"
phone = "555-0100"
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.view.page_size().unwrap().get(), 25);
        assert!(!config.sync.reconcile_after_action);

        let operator = Operator::from_session(config.operator.as_ref().unwrap()).unwrap();
        assert_eq!(operator.name, "Ravi");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Some(Path::new("/nonexistent/ridedesk.toml")));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_operator_config_as_session_store() {
        let operator = OperatorConfig::default();
        assert_eq!(operator.get(ADMIN_ID_KEY).as_deref(), Some(""));
        assert!(operator.get("unknown").is_none());
        // blank values fail the identity lookup
        assert!(Operator::from_session(&operator).is_err());
    }

    #[test]
    fn test_config_serialization_skips_missing_operator() {
        let serialized = serde_json::to_string(&Config::default()).unwrap();
        assert!(!serialized.contains("operator"));
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.view.page_size, 10);
    }
}
