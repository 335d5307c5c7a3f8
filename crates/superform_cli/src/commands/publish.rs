use anyhow::{Context, Result, bail};
use console::style;
use std::path::PathBuf;
use std::time::Instant;
use superform_domain::{ChannelId, PostId, Publishing};
use superform_plugins::PluginRegistry;
use superform_storage::{AppConfig, ChannelStore, PostRepository, TomlDataStore};
use superform_telemetry::PublishEvent;

pub async fn run(config: &AppConfig, data: PathBuf, post_id: i64, channel_id: i64) -> Result<()> {
    let store = TomlDataStore::new(&data)
        .snapshot()
        .await
        .with_context(|| format!("Failed to read {}", data.display()))?;
    let channel = store
        .get(ChannelId(channel_id))
        .await
        .with_context(|| format!("Failed to load channel {channel_id} from {}", data.display()))?;
    let post = store
        .get_post(PostId(post_id))
        .await
        .with_context(|| format!("Failed to load post {post_id} from {}", data.display()))?;

    let registry =
        PluginRegistry::with_defaults(&config.http).context("Failed to initialize plugins")?;
    let publishing = Publishing::for_post(&post, &channel);

    println!(
        "Publishing post {} to {} ({})",
        style(post.id).yellow(),
        style(&channel.name).cyan(),
        channel.module
    );

    let started = Instant::now();
    let outcome = registry
        .publish(&channel, &publishing, &store)
        .await
        .context("Publishing failed")?;
    PublishEvent::from_outcome(
        post.id,
        channel.id,
        &channel.module,
        &outcome,
        started.elapsed().as_millis() as u64,
    )
    .emit();

    if !outcome.is_ok() {
        println!("{}", style(&outcome).red().bold());
        bail!("{outcome}");
    }
    println!("{}", style("Published").green().bold());
    Ok(())
}
