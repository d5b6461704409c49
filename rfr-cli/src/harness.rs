//! Wires the plugin to an in-memory host loaded from a library file

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rfr_core::{
    ActionOutcome, EmittedEvent, LibraryFixture, MemoryHost, PluginContext, ReportForReview,
    WebhookClient,
};

use crate::instance::FileInstance;

/// Plugin plus the host it runs against
pub struct Harness {
    library_path: PathBuf,
    host: Arc<MemoryHost>,
    ctx: PluginContext,
    plugin: ReportForReview,
}

impl Harness {
    /// Load the library fixture (empty if missing) and the plugin instance
    pub fn open(
        library_path: &Path,
        config_path: &Path,
        webhook_timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let fixture = if library_path.exists() {
            LibraryFixture::load_from_file(library_path)
                .with_context(|| format!("Failed to load library {}", library_path.display()))?
        } else {
            LibraryFixture::default()
        };
        let host = Arc::new(MemoryHost::from_fixture(fixture));

        let instance = FileInstance::open(config_path)
            .with_context(|| format!("Failed to open config {}", config_path.display()))?;
        let ctx = PluginContext::new(host.clone(), host.clone(), host.clone(), Arc::new(instance));

        let webhook = match webhook_timeout {
            Some(timeout) => WebhookClient::with_timeout(timeout)?,
            None => WebhookClient::new(),
        };

        Ok(Self {
            library_path: library_path.to_path_buf(),
            host,
            ctx,
            plugin: ReportForReview::with_webhook(webhook),
        })
    }

    pub fn context(&self) -> &PluginContext {
        &self.ctx
    }

    pub fn plugin(&self) -> &ReportForReview {
        &self.plugin
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        self.host.events()
    }

    /// Write the library back if any media was saved
    pub fn persist(&self) -> anyhow::Result<()> {
        if self.host.media_saves() == 0 {
            return Ok(());
        }
        self.host
            .to_fixture()
            .save_to_file(&self.library_path)
            .with_context(|| format!("Failed to write library {}", self.library_path.display()))
    }
}

/// Print an outcome in the plugin protocol format, failing on errors
pub fn print_outcome(outcome: &ActionOutcome) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(outcome)?);
    match outcome.error() {
        Some(message) => anyhow::bail!("Plugin returned error: {}", message),
        None => Ok(()),
    }
}
