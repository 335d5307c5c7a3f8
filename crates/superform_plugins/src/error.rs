use superform_domain::ChannelId;
use superform_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Invalid channel configuration: {0}")]
    Config(String),

    #[error("Invalid page URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Storage: {0}")]
    Storage(#[from] StorageError),

    #[error("No plugin registered for module '{0}'")]
    UnknownModule(String),

    #[error("Publishing targets channel {publishing} but was sent to channel {channel}")]
    ChannelMismatch { publishing: ChannelId, channel: ChannelId },

    #[error("HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<serde_json::Error> for PluginError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;
