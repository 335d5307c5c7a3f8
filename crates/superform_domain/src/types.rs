use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub i64);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ChannelId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(ChannelId)
    }
}

/// Plugin module identifiers known to the application.
pub mod modules {
    pub const WIKI: &str = "wiki";
    pub const LINKEDIN: &str = "linkedin";
    pub const MAIL: &str = "mail";
}

/// A configured publishing destination.
///
/// `module` names the plugin that publishes to this channel and `config`
/// holds that plugin's settings serialized as JSON. An empty `config` means
/// the channel has not been configured yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub module: String,
    #[serde(default)]
    pub config: String,
}

impl Channel {
    pub fn new(id: ChannelId, name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            module: module.into(),
            config: String::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = config.into();
        self
    }

    pub fn is_module(&self, module: &str) -> bool {
        self.module == module
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One request to push a post's content to a channel.
///
/// Built by the orchestrator before a plugin runs and never mutated by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publishing {
    pub title: String,
    pub description: String,
    pub post_id: PostId,
    pub channel_id: ChannelId,
}

impl Publishing {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        post_id: PostId,
        channel_id: ChannelId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            post_id,
            channel_id,
        }
    }

    /// Publishing of `post` to `channel` using the post's own content.
    pub fn for_post(post: &Post, channel: &Channel) -> Self {
        Self::new(post.title.clone(), post.description.clone(), post.id, channel.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display() {
        assert_eq!(PostId(5).to_string(), "5");
        assert_eq!(ChannelId(-1).to_string(), "-1");
    }

    #[test]
    fn test_channel_id_from_str() {
        assert_eq!("42".parse::<ChannelId>().unwrap(), ChannelId(42));
        assert_eq!(" 7 ".parse::<ChannelId>().unwrap(), ChannelId(7));
        assert!("wrong".parse::<ChannelId>().is_err());
        assert!("".parse::<ChannelId>().is_err());
    }

    #[test]
    fn test_channel_builder() {
        let channel = Channel::new(ChannelId(2), "News wiki", modules::WIKI)
            .with_config(r#"{"username":"u"}"#);
        assert!(channel.is_module(modules::WIKI));
        assert!(!channel.is_module(modules::LINKEDIN));
        assert_eq!(channel.config, r#"{"username":"u"}"#);
    }

    #[test]
    fn test_publishing_for_post() {
        let post = Post {
            id: PostId(5),
            user_id: "alice".to_string(),
            title: "Hello".to_string(),
            description: "Body".to_string(),
        };
        let channel = Channel::new(ChannelId(2), "wiki", modules::WIKI);
        let publishing = Publishing::for_post(&post, &channel);
        assert_eq!(publishing.title, "Hello");
        assert_eq!(publishing.description, "Body");
        assert_eq!(publishing.post_id, PostId(5));
        assert_eq!(publishing.channel_id, ChannelId(2));
    }

    #[test]
    fn test_ids_serialize_transparent() {
        let json = serde_json::to_string(&ChannelId(3)).unwrap();
        assert_eq!(json, "3");
        let channel: Channel =
            serde_json::from_str(r#"{"id":-1,"name":"c","module":"mail"}"#).unwrap();
        assert_eq!(channel.id, ChannelId(-1));
        assert!(channel.config.is_empty());
    }
}
