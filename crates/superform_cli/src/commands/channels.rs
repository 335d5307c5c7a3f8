use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use superform_domain::modules;
use superform_plugins::{ChannelPlugin, PluginRegistry};
use superform_storage::{AppConfig, ChannelStore, TomlDataStore};

pub async fn run(config: &AppConfig, data: PathBuf) -> Result<()> {
    let store = TomlDataStore::new(&data);
    let channels = store
        .list()
        .await
        .with_context(|| format!("Failed to read channels from {}", data.display()))?;
    let registry =
        PluginRegistry::with_defaults(&config.http).context("Failed to initialize plugins")?;

    if channels.is_empty() {
        println!("No channels configured in {}", data.display());
        return Ok(());
    }

    for channel in &channels {
        let status = match registry.get(&channel.module) {
            Some(plugin) => {
                let missing = plugin.missing_config_fields(&channel.config);
                if missing.is_empty() {
                    style("ready".to_string()).green()
                } else {
                    style(format!("missing {}", missing.join(", "))).yellow()
                }
            }
            None => style("no publishing plugin".to_string()).dim(),
        };
        println!(
            "{:>4}  {:<24} {:<10} {}",
            channel.id.0,
            channel.name,
            channel.module,
            status
        );
    }

    let uses_linkedin = channels.iter().any(|c| c.is_module(modules::LINKEDIN));
    if uses_linkedin && config.linkedin_settings().is_none() {
        println!();
        println!(
            "{} LinkedIn channels need LINKEDIN_API_KEY and LINKEDIN_API_SECRET",
            style("warning:").yellow().bold()
        );
    }

    Ok(())
}
