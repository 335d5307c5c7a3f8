use crate::error::{PluginError, Result};
use crate::format::{format_text, page_name};
use crate::plugin_trait::ChannelPlugin;
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use superform_domain::{PublishOutcome, Publishing, modules};
use superform_storage::{HttpSettings, PostRepository};
use tracing::{debug, info, warn};

pub const SERVER_DOWN: &str = "Server is down";
pub const NOT_PUBLISHED: &str = "News not published";

const CONFIG_FIELDS: &[&str] = &["username", "password", "base_url"];
const FIELDS_UNAVAILABLE: &[&str] = &["image"];

/// Settings stored in a wiki channel's config.
#[derive(Clone)]
pub struct WikiChannelConfig {
    pub username: String,
    pub password: SecretString,
    pub base_url: String,
}

impl std::fmt::Debug for WikiChannelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikiChannelConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl<'de> Deserialize<'de> for WikiChannelConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct WikiChannelConfigHelper {
            username: String,
            password: String,
            base_url: String,
        }

        let helper = WikiChannelConfigHelper::deserialize(deserializer)?;
        Ok(WikiChannelConfig {
            username: helper.username,
            password: SecretString::new(helper.password.into()),
            base_url: helper.base_url,
        })
    }
}

impl WikiChannelConfig {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// `<base_url>/News/<page>`, with `page` percent-encoded as one path segment.
    pub fn page_url(&self, page: &str) -> Result<url::Url> {
        let invalid = |reason: String| PluginError::InvalidUrl {
            url: format!("{}/News/{}", self.base_url, page),
            reason,
        };
        let mut url = url::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .push("News")
            .push(page);
        Ok(url)
    }
}

/// Publishes posts as news pages on a wiki through its edit action.
pub struct WikiPlugin {
    http: reqwest::Client,
}

impl WikiPlugin {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ChannelPlugin for WikiPlugin {
    fn module(&self) -> &str {
        modules::WIKI
    }

    fn description(&self) -> &str {
        "Publishes posts as news pages on a wiki"
    }

    fn config_fields(&self) -> &[&'static str] {
        CONFIG_FIELDS
    }

    fn unavailable_fields(&self) -> &[&'static str] {
        FIELDS_UNAVAILABLE
    }

    async fn publish(
        &self,
        publishing: &Publishing,
        channel_config: &str,
        posts: &dyn PostRepository,
    ) -> Result<PublishOutcome> {
        let config = WikiChannelConfig::parse(channel_config)?;
        let page = page_name(publishing);
        let url = config.page_url(&page)?;
        let text = format_text(&publishing.title, &publishing.description);
        let author = posts.author_of(publishing.post_id).await?;

        info!(
            post_id = %publishing.post_id,
            channel_id = %publishing.channel_id,
            %url,
            "Publishing news page"
        );

        let form = [
            ("n", format!("News.{page}")),
            ("text", text),
            ("action", "edit".to_string()),
            ("post", "1".to_string()),
            ("author", author),
            ("authid", config.username.clone()),
            ("authpw", config.password.expose_secret().to_string()),
        ];

        let response = match self.http.post(url.clone()).form(&form).send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!(%url, error = %e, "Wiki unreachable");
                return Ok(PublishOutcome::error(SERVER_DOWN));
            }
            Err(e) => {
                warn!(%url, error = %e, "Edit request failed");
                return Ok(PublishOutcome::error(NOT_PUBLISHED));
            }
        };
        if response.status() != StatusCode::OK {
            warn!(%url, status = response.status().as_u16(), "Edit rejected");
            return Ok(PublishOutcome::error(NOT_PUBLISHED));
        }

        // The edit action answers 200 even when nothing was saved.
        match self.http.get(url.clone()).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!(%url, "News page verified");
                Ok(PublishOutcome::ok())
            }
            Ok(response) => {
                warn!(%url, status = response.status().as_u16(), "News page missing after edit");
                Ok(PublishOutcome::error(NOT_PUBLISHED))
            }
            Err(e) => {
                warn!(%url, error = %e, "Verification request failed");
                Ok(PublishOutcome::error(NOT_PUBLISHED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = WikiChannelConfig::parse(
            r#"{"username":"bot","password":"pw","base_url":"http://wiki.local"}"#,
        )
        .unwrap();
        assert_eq!(config.username, "bot");
        assert_eq!(config.password.expose_secret(), "pw");
        assert_eq!(config.base_url, "http://wiki.local");
    }

    #[test]
    fn test_parse_config_ignores_extra_keys() {
        let config = WikiChannelConfig::parse(
            r#"{"username":"bot","password":"pw","base_url":"http://wiki.local","error":"old"}"#,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_parse_config_missing_field() {
        let result = WikiChannelConfig::parse(r#"{"username":"bot","password":"pw"}"#);
        match result {
            Err(PluginError::Config(msg)) => assert!(msg.contains("base_url")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_malformed() {
        assert!(matches!(
            WikiChannelConfig::parse("{not json"),
            Err(PluginError::Config(_))
        ));
        assert!(matches!(WikiChannelConfig::parse(""), Err(PluginError::Config(_))));
    }

    #[test]
    fn test_page_url() {
        let config = WikiChannelConfig::parse(
            r#"{"username":"u","password":"p","base_url":"http://wiki.local/pmwiki"}"#,
        )
        .unwrap();
        let url = config.page_url("HelloWorld-5-2").unwrap();
        assert_eq!(url.as_str(), "http://wiki.local/pmwiki/News/HelloWorld-5-2");
    }

    #[test]
    fn test_page_url_trailing_slash_base() {
        let config = WikiChannelConfig::parse(
            r#"{"username":"u","password":"p","base_url":"http://wiki.local/pmwiki/"}"#,
        )
        .unwrap();
        let url = config.page_url("News-1-1").unwrap();
        assert_eq!(url.as_str(), "http://wiki.local/pmwiki/News/News-1-1");
    }

    #[test]
    fn test_page_url_encodes_page_segment() {
        let config = WikiChannelConfig::parse(
            r#"{"username":"u","password":"p","base_url":"http://wiki.local"}"#,
        )
        .unwrap();
        assert_eq!(
            config.page_url("Hello\rWorld-5-2").unwrap().as_str(),
            "http://wiki.local/News/Hello%0DWorld-5-2"
        );
        assert_eq!(
            config.page_url("Tab\there-5-2").unwrap().as_str(),
            "http://wiki.local/News/Tab%09here-5-2"
        );
        assert_eq!(
            config.page_url("Café-5-2").unwrap().as_str(),
            "http://wiki.local/News/Caf%C3%A9-5-2"
        );
    }

    #[test]
    fn test_page_url_rejects_relative_base() {
        let config =
            WikiChannelConfig::parse(r#"{"username":"u","password":"p","base_url":"wiki"}"#)
                .unwrap();
        assert!(matches!(
            config.page_url("x-1-1"),
            Err(PluginError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = WikiChannelConfig::parse(
            r#"{"username":"u","password":"hunter2","base_url":"http://w"}"#,
        )
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_config_fields() {
        let plugin = WikiPlugin::new(&HttpSettings::default()).unwrap();
        assert_eq!(
            plugin.missing_config_fields(""),
            vec!["username", "password", "base_url"]
        );
        assert_eq!(
            plugin.missing_config_fields(r#"{"username":"u","password":"","base_url":null}"#),
            vec!["password", "base_url"]
        );
        assert!(plugin
            .missing_config_fields(r#"{"username":"u","password":"p","base_url":"http://w"}"#)
            .is_empty());
    }

    #[test]
    fn test_plugin_metadata() {
        let plugin = WikiPlugin::new(&HttpSettings::default()).unwrap();
        assert_eq!(plugin.module(), "wiki");
        assert_eq!(plugin.unavailable_fields(), &["image"]);
        assert_eq!(plugin.config_fields(), &["username", "password", "base_url"]);
    }
}
