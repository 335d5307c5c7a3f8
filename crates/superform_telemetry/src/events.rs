use chrono::{DateTime, Utc};
use serde::Serialize;
use superform_domain::{ChannelId, PostId, PublishOutcome, PublishStatus};
use uuid::Uuid;

/// One publish attempt as seen by the orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct PublishEvent {
    pub attempt_id: Uuid,
    pub post_id: PostId,
    pub channel_id: ChannelId,
    pub module: String,
    pub status: PublishStatus,
    pub message: Option<String>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl PublishEvent {
    pub fn from_outcome(
        post_id: PostId,
        channel_id: ChannelId,
        module: impl Into<String>,
        outcome: &PublishOutcome,
        duration_ms: u64,
    ) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            post_id,
            channel_id,
            module: module.into(),
            status: outcome.status,
            message: outcome.message.clone(),
            duration_ms,
            timestamp: Utc::now(),
        }
    }

    /// Emit the event through `tracing` as a single structured record.
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        match self.status {
            PublishStatus::Ok => tracing::info!(target: "superform::publish", event = %json, "publish_event"),
            PublishStatus::Error => tracing::warn!(target: "superform::publish", event = %json, "publish_event"),
        }
    }
}
