//! File-backed plugin instance
//!
//! Stands in for the host's persisted plugin record: configuration lives in a
//! TOML file and is only written when the plugin calls `save()`.
//! `RFR_REQUEST_ADDRESS` is applied when the config is read and never
//! written back.

use std::path::PathBuf;

use async_trait::async_trait;
use rfr_core::{PluginInstance, ReviewConfig, REQUEST_ADDRESS_ENV};
use tokio::sync::Mutex;
use tracing::debug;

pub struct FileInstance {
    path: PathBuf,
    config: Mutex<Option<ReviewConfig>>,
}

impl FileInstance {
    /// Open the instance at `path`; a missing file means "never initialized"
    pub fn open(path: impl Into<PathBuf>) -> rfr_core::Result<Self> {
        let path = path.into();
        let config = if path.exists() {
            Some(ReviewConfig::load_from_file(&path)?)
        } else {
            None
        };
        debug!(path = %path.display(), initialized = config.is_some(), "Opened plugin instance");

        Ok(Self {
            path,
            config: Mutex::new(config),
        })
    }

    /// Configuration as stored in the file, without overrides
    pub async fn stored_config(&self) -> Option<ReviewConfig> {
        self.config.lock().await.clone()
    }
}

/// Stored config with the webhook address override on top
fn effective_config(
    stored: Option<ReviewConfig>,
    address_override: Option<String>,
) -> Option<ReviewConfig> {
    match address_override {
        Some(address) => Some(
            stored
                .unwrap_or_default()
                .with_request_address_override(Some(address)),
        ),
        None => stored,
    }
}

#[async_trait]
impl PluginInstance for FileInstance {
    async fn config(&self) -> Option<ReviewConfig> {
        effective_config(
            self.stored_config().await,
            std::env::var(REQUEST_ADDRESS_ENV).ok(),
        )
    }

    async fn set_config(&self, config: ReviewConfig) {
        *self.config.lock().await = Some(config);
    }

    async fn save(&self) -> rfr_core::Result<()> {
        let config = self.stored_config().await.unwrap_or_default();
        config.save_to_file(&self.path)?;
        debug!(path = %self.path.display(), "Saved plugin config");
        Ok(())
    }
}
