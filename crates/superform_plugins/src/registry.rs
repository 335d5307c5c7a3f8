use crate::error::{PluginError, Result};
use crate::plugin_trait::ChannelPlugin;
use crate::wiki::WikiPlugin;
use indexmap::IndexMap;
use std::sync::Arc;
use superform_domain::{Channel, PublishOutcome, Publishing};
use superform_storage::{HttpSettings, PostRepository};
use tracing::{debug, info, warn};

/// Maps channel module identifiers to their publishing plugins.
///
/// Built once at startup; channels select a plugin through `Channel::module`.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Arc<dyn ChannelPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in plugin.
    pub fn with_defaults(settings: &HttpSettings) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(WikiPlugin::new(settings)?));
        Ok(registry)
    }

    /// Register a plugin, replacing any plugin with the same module id
    pub fn register(&mut self, plugin: Arc<dyn ChannelPlugin>) {
        let module = plugin.module().to_string();
        if self.plugins.insert(module.clone(), plugin).is_some() {
            warn!(%module, "Replaced previously registered plugin");
        } else {
            debug!(%module, "Registered plugin");
        }
    }

    pub fn get(&self, module: &str) -> Option<Arc<dyn ChannelPlugin>> {
        self.plugins.get(module).cloned()
    }

    pub fn contains(&self, module: &str) -> bool {
        self.plugins.contains_key(module)
    }

    /// Registered module ids in registration order
    pub fn modules(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Publish to `channel` with the plugin its module names.
    pub async fn publish(
        &self,
        channel: &Channel,
        publishing: &Publishing,
        posts: &dyn PostRepository,
    ) -> Result<PublishOutcome> {
        if publishing.channel_id != channel.id {
            return Err(PluginError::ChannelMismatch {
                publishing: publishing.channel_id,
                channel: channel.id,
            });
        }
        let plugin = self
            .get(&channel.module)
            .ok_or_else(|| PluginError::UnknownModule(channel.module.clone()))?;

        let outcome = plugin.publish(publishing, &channel.config, posts).await?;
        info!(
            channel = %channel.name,
            module = %channel.module,
            post_id = %publishing.post_id,
            outcome = %outcome,
            "Publish finished"
        );
        Ok(outcome)
    }
}
