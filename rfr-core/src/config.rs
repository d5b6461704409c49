//! Plugin configuration
//!
//! The host hands the plugin its configuration through the plugin instance.
//! Outside a host (the `rfr` harness) the same structure is persisted as TOML
//! at `~/.config/rfr/config.toml`, with `RFR_REQUEST_ADDRESS` overriding the
//! webhook address.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Environment variable overriding the webhook address
pub const REQUEST_ADDRESS_ENV: &str = "RFR_REQUEST_ADDRESS";

/// Report-for-review configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewConfig {
    /// Webhook URL that receives reports; empty disables forwarding
    pub request_address: String,

    /// Whether reports annotate the item description
    pub update_description: bool,
}

impl ReviewConfig {
    /// Validate a raw config object as submitted from the config page
    ///
    /// `requestAddress` is checked before `updateDescription`. Missing keys
    /// fail the same way as mistyped ones.
    pub fn from_value(value: &Value) -> Result<Self> {
        let request_address = value
            .get("requestAddress")
            .and_then(Value::as_str)
            .ok_or(Error::InvalidRequestAddress)?;
        let update_description = value
            .get("updateDescription")
            .and_then(Value::as_bool)
            .ok_or(Error::InvalidUpdateDescription)?;

        Ok(Self {
            request_address: request_address.to_string(),
            update_description,
        })
    }

    /// Webhook address, if forwarding is enabled
    pub fn webhook_address(&self) -> Option<&str> {
        if self.request_address.is_empty() {
            None
        } else {
            Some(&self.request_address)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Write configuration to a specific file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/rfr/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rfr").join("config.toml"))
    }

    /// Replace the webhook address when `address` is set
    pub fn with_request_address_override(mut self, address: Option<String>) -> Self {
        if let Some(address) = address {
            self.request_address = address;
        }
        self
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - RFR_REQUEST_ADDRESS: webhook address
    pub fn with_env_overrides(self) -> Self {
        self.with_request_address_override(std::env::var(REQUEST_ADDRESS_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ReviewConfig::default();
        assert_eq!(config.request_address, "");
        assert!(!config.update_description);
        assert!(config.webhook_address().is_none());
    }

    #[test]
    fn test_from_value_valid() {
        let config = ReviewConfig::from_value(&json!({
            "requestAddress": "http://localhost:9000/report",
            "updateDescription": true
        }))
        .unwrap();
        assert_eq!(config.webhook_address(), Some("http://localhost:9000/report"));
        assert!(config.update_description);
    }

    #[test]
    fn test_from_value_bad_address() {
        let err = ReviewConfig::from_value(&json!({
            "requestAddress": 123,
            "updateDescription": true
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRequestAddress));
    }

    #[test]
    fn test_from_value_bad_flag() {
        let err = ReviewConfig::from_value(&json!({
            "requestAddress": "",
            "updateDescription": "yes"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUpdateDescription));
    }

    #[test]
    fn test_address_checked_first() {
        let err = ReviewConfig::from_value(&json!({})).unwrap_err();
        assert!(matches!(err, Error::InvalidRequestAddress));
    }

    #[test]
    fn test_camel_case_json() {
        let config = ReviewConfig {
            request_address: "http://x".to_string(),
            update_description: true,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({ "requestAddress": "http://x", "updateDescription": true })
        );
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = ReviewConfig {
            request_address: "http://hooks.local/report".to_string(),
            update_description: true,
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(ReviewConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_request_address_override() {
        let config = ReviewConfig {
            request_address: "http://file.local".to_string(),
            update_description: true,
        };

        let kept = config.clone().with_request_address_override(None);
        assert_eq!(kept, config);

        let replaced = config.with_request_address_override(Some("http://env.local".to_string()));
        assert_eq!(replaced.request_address, "http://env.local");
        assert!(replaced.update_description);
    }

    // Only test in this crate touching the variable.
    #[test]
    fn test_env_overrides() {
        std::env::set_var(REQUEST_ADDRESS_ENV, "http://env.local/hook");
        let config = ReviewConfig::default().with_env_overrides();
        std::env::remove_var(REQUEST_ADDRESS_ENV);

        assert_eq!(config.webhook_address(), Some("http://env.local/hook"));
        assert_eq!(ReviewConfig::default().with_env_overrides(), ReviewConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: ReviewConfig = toml::from_str("updateDescription = true\n").unwrap();
        assert_eq!(config.request_address, "");
        assert!(config.update_description);
    }
}
