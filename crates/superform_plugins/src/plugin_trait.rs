use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use superform_domain::{PublishOutcome, Publishing};
use superform_storage::{PostRepository, parse_config_object};

/// Publish capability implemented once per channel type.
#[async_trait]
pub trait ChannelPlugin: Send + Sync {
    /// Module identifier channels use to select this plugin
    fn module(&self) -> &str;

    fn description(&self) -> &str;

    /// Keys the serialized channel config must provide
    fn config_fields(&self) -> &[&'static str];

    /// Post fields this channel type cannot carry
    fn unavailable_fields(&self) -> &[&'static str] {
        &[]
    }

    /// Publish `publishing` using the channel's serialized configuration.
    ///
    /// Delivery failures come back as an error [`PublishOutcome`]; `Err` is
    /// reserved for problems the caller has to fix (bad config, missing post).
    async fn publish(
        &self,
        publishing: &Publishing,
        channel_config: &str,
        posts: &dyn PostRepository,
    ) -> Result<PublishOutcome>;

    /// Config fields that are absent, null or empty in `raw`.
    ///
    /// A config that is not a JSON object is missing every field.
    fn missing_config_fields(&self, raw: &str) -> Vec<&'static str> {
        let map = parse_config_object(raw).unwrap_or_default();
        self.config_fields()
            .iter()
            .copied()
            .filter(|field| match map.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            })
            .collect()
    }
}
