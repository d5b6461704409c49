//! RFR Core - report-for-review plugin for a media library host
//!
//! Lets users flag library items for review. A report tags the item (and
//! optionally annotates its description) and can forward the report to a
//! webhook; marking the item fixed removes the flags again.

pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod model;
pub mod plugin;
pub mod review;
pub mod webhook;

#[cfg(test)]
mod testing;

pub use config::{ReviewConfig, REQUEST_ADDRESS_ENV};
pub use error::{Error, ErrorKind, Result};
pub use host::{
    LibraryItemStore, PluginContext, PluginInstance, SocketEmitter, UserStore, ITEM_UPDATED_EVENT,
};
pub use memory::{EmittedEvent, LibraryFixture, MemoryHost};
pub use model::{
    ActionData, LibraryItem, Media, MediaType, PromptData, ReportReason, ReportRequest, User,
};
pub use plugin::{ActionOutcome, PluginAction, ReportForReview};
pub use webhook::WebhookClient;
