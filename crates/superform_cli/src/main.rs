use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use superform_storage::TomlConfigStore;

mod commands;

#[derive(Parser)]
#[command(name = "superform")]
#[command(version, about = "Superform - publish posts to configured channels", long_about = None)]
struct Cli {
    /// Application config file (TOML)
    #[arg(long, global = true, default_value = "superform.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a stored post to one channel
    Publish {
        /// Data file holding channels and posts (TOML)
        #[arg(long)]
        data: PathBuf,

        /// Post ID
        #[arg(long)]
        post: i64,

        /// Channel ID
        #[arg(long, allow_negative_numbers = true)]
        channel: i64,
    },

    /// List channels and whether their configuration is complete
    Channels {
        /// Data file holding channels and posts (TOML)
        #[arg(long)]
        data: PathBuf,
    },

    /// Print the wiki page name derived from a title
    FormatTitle {
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TomlConfigStore::new(&cli.config)
        .load()
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    superform_telemetry::init_telemetry(
        &superform_telemetry::TelemetryConfig::with_level_name(&config.log_level)
            .json(config.log_json),
    )?;

    match cli.command {
        Commands::Publish {
            data,
            post,
            channel,
        } => commands::publish::run(&config, data, post, channel).await,
        Commands::Channels { data } => commands::channels::run(&config, data).await,
        Commands::FormatTitle { title } => commands::format_title::run(title),
    }
}
