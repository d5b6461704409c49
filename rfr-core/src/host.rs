//! Host capabilities the plugin runs against
//!
//! The host application owns the library database, user accounts, the socket
//! broadcaster and the persisted plugin instance. The plugin only sees them
//! through these traits, bundled into a [`PluginContext`] per call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ReviewConfig;
use crate::model::{LibraryItem, User};
use crate::Result;

/// Socket event broadcast after an item's media changes
pub const ITEM_UPDATED_EVENT: &str = "item_updated";

/// Library item access
#[async_trait]
pub trait LibraryItemStore: Send + Sync {
    /// Fetch an item with its media expanded
    async fn get_expanded_by_id(&self, id: &str) -> Result<Option<LibraryItem>>;

    /// Persist the item's media record
    async fn save_media(&self, item: &LibraryItem) -> Result<()>;

    /// Expanded JSON representation used in change notifications
    fn expanded_snapshot(&self, item: &LibraryItem) -> Result<Value>;
}

/// User account access
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_pk(&self, id: &str) -> Result<Option<User>>;
}

/// Broadcast channel to connected clients
pub trait SocketEmitter: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

/// Host-managed plugin state
#[async_trait]
pub trait PluginInstance: Send + Sync {
    /// Current configuration, `None` before the first save
    async fn config(&self) -> Option<ReviewConfig>;

    /// Replace the configuration in memory
    async fn set_config(&self, config: ReviewConfig);

    /// Persist the current configuration
    async fn save(&self) -> Result<()>;
}

/// Everything the host hands to an entry point
#[derive(Clone)]
pub struct PluginContext {
    pub library_items: Arc<dyn LibraryItemStore>,
    pub users: Arc<dyn UserStore>,
    pub sockets: Arc<dyn SocketEmitter>,
    pub instance: Arc<dyn PluginInstance>,
}

impl PluginContext {
    pub fn new(
        library_items: Arc<dyn LibraryItemStore>,
        users: Arc<dyn UserStore>,
        sockets: Arc<dyn SocketEmitter>,
        instance: Arc<dyn PluginInstance>,
    ) -> Self {
        Self {
            library_items,
            users,
            sockets,
            instance,
        }
    }

    /// Current configuration, falling back to defaults if never initialized
    pub async fn config(&self) -> ReviewConfig {
        self.instance.config().await.unwrap_or_default()
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext").finish_non_exhaustive()
    }
}
