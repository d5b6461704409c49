//! RFR CLI - development harness for the report-for-review plugin
//!
//! Runs the plugin's entry points against a JSON library file, standing in
//! for the media library host.

mod commands;
mod harness;
mod instance;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rfr_core::ReviewConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ActionArgs, ConfigArgs};
use harness::{print_outcome, Harness};

/// Report for Review: flag library items for review
#[derive(Parser, Debug)]
#[command(name = "rfr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Library file (JSON with `items` and `users`)
    #[arg(long, global = true, env = "RFR_LIBRARY", default_value = "library.json")]
    library: PathBuf,

    /// Plugin config file (defaults to ~/.config/rfr/config.toml)
    #[arg(long, global = true, env = "RFR_CONFIG")]
    config: Option<PathBuf>,

    /// Abort webhook delivery after this many seconds
    #[arg(long, global = true)]
    webhook_timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Initialize the plugin, writing the default config if none exists
    Init,

    /// Report a library item for review
    Report(ActionArgs),

    /// Mark a library item as fixed
    Fixed(ActionArgs),

    /// Trigger an arbitrary plugin action
    Action {
        /// Action name
        name: String,

        #[command(flatten)]
        args: ActionArgs,
    },

    /// Show or change the plugin configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => ReviewConfig::default_config_path()
            .context("Could not determine config directory; pass --config")?,
    };

    if cli.verbose {
        tracing::info!(
            library = %cli.library.display(),
            config = %config_path.display(),
            "Opening harness"
        );
    }

    let command = match cli.command {
        Some(Commands::Version) => {
            println!("rfr {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("Report for Review - flag library items for review");
            println!();
            println!("Use --help for usage information");
            return Ok(());
        }
    };

    let harness = Harness::open(
        &cli.library,
        &config_path,
        cli.webhook_timeout.map(Duration::from_secs),
    )?;

    match command {
        Commands::Init => {
            let outcome = harness.plugin().init(harness.context()).await;
            print_outcome(&outcome)?;
        }
        Commands::Report(args) => args.execute("report", &harness, cli.verbose).await?,
        Commands::Fixed(args) => args.execute("fixed", &harness, cli.verbose).await?,
        Commands::Action { name, args } => args.execute(&name, &harness, cli.verbose).await?,
        Commands::Config(args) => args.execute(&harness).await?,
        Commands::Version => {}
    }

    Ok(())
}
