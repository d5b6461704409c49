//! Plugin entry points
//!
//! The host calls [`ReportForReview::init`] once when the plugin loads,
//! [`ReportForReview::on_action`] when a user triggers one of the plugin's
//! item actions, and [`ReportForReview::on_config_save`] from the config page.
//! Every entry point answers with an [`ActionOutcome`]; errors never escape.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ReviewConfig;
use crate::host::{PluginContext, ITEM_UPDATED_EVENT};
use crate::model::{ActionData, LibraryItem, ReportRequest};
use crate::review::{self, KNOWN_REVIEW_TAGS};
use crate::webhook::WebhookClient;
use crate::{Error, Result};

/// Result of an entry point, serialized as `true` or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    Failed(String),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success)
    }

    /// Error message, if the call failed
    pub fn error(&self) -> Option<&str> {
        match self {
            ActionOutcome::Success => None,
            ActionOutcome::Failed(message) => Some(message),
        }
    }
}

impl From<Result<()>> for ActionOutcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => ActionOutcome::Success,
            Err(e) => {
                error!(error = ?e, kind = ?e.kind(), "Plugin call failed");
                ActionOutcome::Failed(e.to_string())
            }
        }
    }
}

impl Serialize for ActionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ActionOutcome::Success => serializer.serialize_bool(true),
            ActionOutcome::Failed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

/// Item actions the plugin registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginAction {
    /// Flag an item for review
    Report,
    /// Clear review flags from an item
    Fixed,
    /// Anything else; accepted and ignored
    Other(String),
}

impl PluginAction {
    pub fn parse(name: &str) -> Self {
        match name {
            "report" => PluginAction::Report,
            "fixed" => PluginAction::Fixed,
            other => PluginAction::Other(other.to_string()),
        }
    }
}

/// The report-for-review plugin
#[derive(Debug, Clone, Default)]
pub struct ReportForReview {
    webhook: WebhookClient,
}

impl ReportForReview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific webhook client
    pub fn with_webhook(webhook: WebhookClient) -> Self {
        Self { webhook }
    }

    /// Write the default configuration on first load
    pub async fn init(&self, ctx: &PluginContext) -> ActionOutcome {
        init_config(ctx).await.into()
    }

    /// Handle an item action
    pub async fn on_action(
        &self,
        ctx: &PluginContext,
        action_name: &str,
        target: &str,
        data: &ActionData,
    ) -> ActionOutcome {
        info!(
            action = %action_name,
            target = %target,
            entity_id = %data.entity_id,
            "Plugin action"
        );
        self.dispatch(ctx, PluginAction::parse(action_name), data)
            .await
            .into()
    }

    /// Validate and store a configuration submitted from the config page
    pub async fn on_config_save(&self, ctx: &PluginContext, config: &Value) -> ActionOutcome {
        info!(config = %config, "Plugin config save");
        save_config(ctx, config).await.into()
    }

    async fn dispatch(
        &self,
        ctx: &PluginContext,
        action: PluginAction,
        data: &ActionData,
    ) -> Result<()> {
        let item = ctx
            .library_items
            .get_expanded_by_id(&data.entity_id)
            .await?
            .ok_or_else(|| Error::LibraryItemNotFound(data.entity_id.clone()))?;

        match action {
            PluginAction::Report => self.handle_report(ctx, data, item).await,
            PluginAction::Fixed => handle_fixed(ctx, item).await,
            PluginAction::Other(name) => {
                debug!(action = %name, "Ignoring unknown action");
                Ok(())
            }
        }
    }

    async fn handle_report(
        &self,
        ctx: &PluginContext,
        data: &ActionData,
        mut item: LibraryItem,
    ) -> Result<()> {
        let user_id = data.user_id.as_deref().unwrap_or_default();
        let user = ctx
            .users
            .find_by_pk(user_id)
            .await?
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;

        let prompt = data.prompt_data.clone().unwrap_or_default();
        info!(
            "User \"{}\" reported {} \"{}\" with reason \"{}\" and comments \"{}\"",
            user.username,
            item.media_type,
            item.media.title,
            prompt.reason_label(),
            prompt.comments_label()
        );

        let config = ctx.config().await;
        let tags = review::report_tags(&prompt);
        let mut changed = review::add_tags(&mut item.media, &tags);
        if config.update_description {
            changed |= review::annotate_description(&mut item.media, &user.username, &prompt);
        }

        if changed {
            ctx.library_items.save_media(&item).await?;
            info!(
                item_id = %item.id,
                tags = ?tags,
                "Added tags to {} \"{}\"",
                item.media_type,
                item.media.title
            );
            notify_item_updated(ctx, &item)?;
        }

        // Media changes above stay persisted even if delivery fails.
        if let Some(address) = config.webhook_address() {
            let request = ReportRequest {
                user: user.username,
                title: item.media.title,
                reason: prompt.reason,
                comments: prompt.comments,
            };
            self.webhook.send(address, &request).await?;
            info!(address = %address, "Sent report");
        }

        Ok(())
    }
}

async fn init_config(ctx: &PluginContext) -> Result<()> {
    if ctx.instance.config().await.is_none() {
        info!("First init, setting default config");
        ctx.instance.set_config(ReviewConfig::default()).await;
        ctx.instance.save().await?;
    }
    info!("Plugin initialized");
    Ok(())
}

async fn save_config(ctx: &PluginContext, raw: &Value) -> Result<()> {
    let config = ReviewConfig::from_value(raw)?;
    ctx.instance.set_config(config.clone()).await;
    ctx.instance.save().await?;
    info!(
        request_address = %config.request_address,
        update_description = config.update_description,
        "Plugin config saved"
    );
    Ok(())
}

async fn handle_fixed(ctx: &PluginContext, mut item: LibraryItem) -> Result<()> {
    let config = ctx.config().await;
    let mut changed = review::remove_tags(&mut item.media, &KNOWN_REVIEW_TAGS);
    if config.update_description {
        changed |= review::strip_annotation(&mut item.media);
    }

    if changed {
        ctx.library_items.save_media(&item).await?;
        info!(
            item_id = %item.id,
            tags = ?KNOWN_REVIEW_TAGS,
            "Removed tags from {} \"{}\"",
            item.media_type,
            item.media.title
        );
        notify_item_updated(ctx, &item)?;
    }

    Ok(())
}

/// Broadcast the post-save snapshot of an item
fn notify_item_updated(ctx: &PluginContext, item: &LibraryItem) -> Result<()> {
    let snapshot = ctx.library_items.expanded_snapshot(item)?;
    ctx.sockets.emit(ITEM_UPDATED_EVENT, snapshot);
    Ok(())
}
