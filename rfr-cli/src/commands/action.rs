//! Item actions - report an item or mark it fixed

use clap::Args;
use rfr_core::{ActionData, PromptData, ReportReason};

use crate::harness::{print_outcome, Harness};

/// Arguments shared by item actions
#[derive(Args, Debug, Clone)]
pub struct ActionArgs {
    /// Library item id
    #[arg(required = true)]
    pub item: String,

    /// Reporting user id
    #[arg(short, long)]
    pub user: Option<String>,

    /// Report reason (explicit, incorrectMetadata, mismatched, audioIssue, ...)
    #[arg(short, long)]
    pub reason: Option<String>,

    /// Free-form comments
    #[arg(short, long)]
    pub comments: Option<String>,
}

impl ActionArgs {
    /// Payload the host would send with this action
    pub fn action_data(&self) -> ActionData {
        let prompt_data = if self.reason.is_some() || self.comments.is_some() {
            Some(PromptData {
                reason: self.reason.clone().map(ReportReason::from),
                comments: self.comments.clone(),
            })
        } else {
            None
        };

        ActionData {
            entity_id: self.item.clone(),
            user_id: self.user.clone(),
            prompt_data,
        }
    }

    /// Run `action` against the harness and write back any changes
    pub async fn execute(&self, action: &str, harness: &Harness, verbose: bool) -> anyhow::Result<()> {
        let data = self.action_data();
        let outcome = harness
            .plugin()
            .on_action(harness.context(), action, "libraryItem", &data)
            .await;

        // Media saved before a webhook failure must still reach disk.
        harness.persist()?;

        if verbose {
            for event in harness.events() {
                tracing::info!(event = %event.event, payload = %event.payload, "Socket event");
            }
        }

        print_outcome(&outcome)
    }
}
