//! In-memory host
//!
//! Backs every host capability with plain maps. Used as the test double for
//! the plugin and as the host of the `rfr` harness, which loads and dumps
//! the library as a JSON [`LibraryFixture`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::ReviewConfig;
use crate::host::{LibraryItemStore, PluginContext, PluginInstance, SocketEmitter, UserStore};
use crate::model::{LibraryItem, User};
use crate::{Error, Result};

/// Serialized library contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFixture {
    #[serde(default)]
    pub items: Vec<LibraryItem>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl LibraryFixture {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// A socket event recorded by [`MemoryHost`]
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub event: String,
    pub payload: Value,
}

/// Host implementation holding everything in memory
#[derive(Debug, Default)]
pub struct MemoryHost {
    items: Mutex<BTreeMap<String, LibraryItem>>,
    users: Mutex<BTreeMap<String, User>>,
    events: Mutex<Vec<EmittedEvent>>,
    config: Mutex<Option<ReviewConfig>>,
    saved_config: Mutex<Option<ReviewConfig>>,
    media_saves: AtomicUsize,
    fail_media_saves: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: LibraryFixture) -> Self {
        let host = Self::new();
        for item in fixture.items {
            host.insert_item(item);
        }
        for user in fixture.users {
            host.insert_user(user);
        }
        host
    }

    /// Current library contents, ordered by id
    pub fn to_fixture(&self) -> LibraryFixture {
        LibraryFixture {
            items: lock(&self.items).values().cloned().collect(),
            users: lock(&self.users).values().cloned().collect(),
        }
    }

    pub fn insert_item(&self, item: LibraryItem) {
        lock(&self.items).insert(item.id.clone(), item);
    }

    pub fn insert_user(&self, user: User) {
        lock(&self.users).insert(user.id.clone(), user);
    }

    /// Stored copy of an item
    pub fn item(&self, id: &str) -> Option<LibraryItem> {
        lock(&self.items).get(id).cloned()
    }

    /// Socket events emitted so far
    pub fn events(&self) -> Vec<EmittedEvent> {
        lock(&self.events).clone()
    }

    /// Number of media records persisted
    pub fn media_saves(&self) -> usize {
        self.media_saves.load(Ordering::SeqCst)
    }

    /// Configuration as of the last [`PluginInstance::save`]
    pub fn saved_config(&self) -> Option<ReviewConfig> {
        lock(&self.saved_config).clone()
    }

    /// Make subsequent media saves fail
    pub fn fail_media_saves(&self, fail: bool) {
        self.fail_media_saves.store(fail, Ordering::SeqCst);
    }

    /// Context using this host for every capability
    pub fn context(self: &Arc<Self>) -> PluginContext {
        PluginContext::new(self.clone(), self.clone(), self.clone(), self.clone())
    }
}

#[async_trait]
impl LibraryItemStore for MemoryHost {
    async fn get_expanded_by_id(&self, id: &str) -> Result<Option<LibraryItem>> {
        Ok(self.item(id))
    }

    async fn save_media(&self, item: &LibraryItem) -> Result<()> {
        if self.fail_media_saves.load(Ordering::SeqCst) {
            return Err(Error::Host(format!("Failed to save media for {}", item.id)));
        }

        let mut items = lock(&self.items);
        let stored = items
            .get_mut(&item.id)
            .ok_or_else(|| Error::Host(format!("No library item {} to save", item.id)))?;
        stored.media = item.media.clone();
        self.media_saves.fetch_add(1, Ordering::SeqCst);
        debug!(item_id = %item.id, "Saved media");
        Ok(())
    }

    fn expanded_snapshot(&self, item: &LibraryItem) -> Result<Value> {
        Ok(serde_json::to_value(item)?)
    }
}

#[async_trait]
impl UserStore for MemoryHost {
    async fn find_by_pk(&self, id: &str) -> Result<Option<User>> {
        Ok(lock(&self.users).get(id).cloned())
    }
}

impl SocketEmitter for MemoryHost {
    fn emit(&self, event: &str, payload: Value) {
        lock(&self.events).push(EmittedEvent {
            event: event.to_string(),
            payload,
        });
    }
}

#[async_trait]
impl PluginInstance for MemoryHost {
    async fn config(&self) -> Option<ReviewConfig> {
        lock(&self.config).clone()
    }

    async fn set_config(&self, config: ReviewConfig) {
        *lock(&self.config) = Some(config);
    }

    async fn save(&self) -> Result<()> {
        let current = lock(&self.config).clone();
        *lock(&self.saved_config) = current;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Media, MediaType};
    use tempfile::TempDir;

    fn item(id: &str) -> LibraryItem {
        LibraryItem {
            id: id.to_string(),
            media_type: MediaType::Podcast,
            media: Media {
                title: format!("Title {}", id),
                tags: None,
                description: None,
            },
        }
    }

    #[tokio::test]
    async fn test_save_media_updates_store() {
        let host = MemoryHost::new();
        host.insert_item(item("li_1"));

        let mut changed = host.get_expanded_by_id("li_1").await.unwrap().unwrap();
        changed.media.tags = Some(vec!["Needs Review".to_string()]);
        host.save_media(&changed).await.unwrap();

        assert_eq!(host.item("li_1").unwrap().media.tags(), ["Needs Review"]);
        assert_eq!(host.media_saves(), 1);
    }

    #[tokio::test]
    async fn test_save_media_failure() {
        let host = MemoryHost::new();
        host.insert_item(item("li_1"));
        host.fail_media_saves(true);

        let err = host.save_media(&item("li_1")).await.unwrap_err();
        assert!(matches!(err, Error::Host(_)));
        assert_eq!(host.media_saves(), 0);
    }

    #[tokio::test]
    async fn test_config_only_persisted_on_save() {
        let host = MemoryHost::new();
        assert!(host.config().await.is_none());

        host.set_config(ReviewConfig::default()).await;
        assert!(host.saved_config().is_none());

        host.save().await.unwrap();
        assert_eq!(host.saved_config(), Some(ReviewConfig::default()));
    }

    #[test]
    fn test_fixture_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");

        let host = MemoryHost::new();
        host.insert_item(item("li_2"));
        host.insert_item(item("li_1"));
        host.insert_user(User {
            id: "u_1".to_string(),
            username: "alice".to_string(),
        });
        host.to_fixture().save_to_file(&path).unwrap();

        let loaded = LibraryFixture::load_from_file(&path).unwrap();
        assert_eq!(loaded.items[0].id, "li_1");
        assert_eq!(loaded.users[0].username, "alice");
        assert_eq!(MemoryHost::from_fixture(loaded).to_fixture(), host.to_fixture());
    }
}
