//! Config commands - inspect or change the plugin configuration

use clap::{Args, Subcommand};
use rfr_core::REQUEST_ADDRESS_ENV;
use serde_json::{json, Value};

use crate::harness::{print_outcome, Harness};

/// Plugin configuration commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,

    /// Save a new configuration
    Set {
        /// Webhook URL receiving reports (empty disables forwarding)
        #[arg(long, default_value = "")]
        request_address: String,

        /// Annotate descriptions of reported items
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        update_description: bool,
    },

    /// Save a configuration given as a raw JSON object, as the config page sends it
    Raw {
        /// JSON object with requestAddress and updateDescription
        json: String,
    },
}

impl ConfigArgs {
    /// Execute the config command
    pub async fn execute(&self, harness: &Harness) -> anyhow::Result<()> {
        match &self.command {
            ConfigCommand::Show => {
                let config = harness.context().instance.config().await;
                println!("Report for Review Configuration");
                println!("===============================");
                println!();
                match config {
                    Some(config) => {
                        let address = config.webhook_address().unwrap_or("(disabled)");
                        println!("  requestAddress: {}", address);
                        println!("  updateDescription: {}", config.update_description);
                        if std::env::var(REQUEST_ADDRESS_ENV).is_ok() {
                            println!();
                            println!("  (requestAddress overridden by {})", REQUEST_ADDRESS_ENV);
                        }
                    }
                    None => println!("  (not initialized - run `rfr init`)"),
                }
                Ok(())
            }
            ConfigCommand::Set {
                request_address,
                update_description,
            } => {
                let raw = json!({
                    "requestAddress": request_address,
                    "updateDescription": update_description,
                });
                save(harness, &raw).await
            }
            ConfigCommand::Raw { json } => {
                let raw: Value = serde_json::from_str(json)?;
                save(harness, &raw).await
            }
        }
    }
}

async fn save(harness: &Harness, raw: &Value) -> anyhow::Result<()> {
    let outcome = harness
        .plugin()
        .on_config_save(harness.context(), raw)
        .await;
    print_outcome(&outcome)
}
