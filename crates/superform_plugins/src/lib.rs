//! # Superform Plugins
//!
//! Channel publishing plugins. Each channel type implements [`ChannelPlugin`]
//! and is registered in a [`PluginRegistry`] keyed by its module id; the
//! orchestrator resolves a channel's plugin through the registry and hands it
//! the channel's serialized configuration.
//!
//! ## Example
//!
//! ```rust,no_run
//! use superform_domain::{Channel, ChannelId, PostId, Publishing, modules};
//! use superform_plugins::PluginRegistry;
//! use superform_storage::{HttpSettings, InMemoryStore};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = PluginRegistry::with_defaults(&HttpSettings::default())?;
//! let posts = InMemoryStore::new();
//! let channel = Channel::new(ChannelId(2), "News wiki", modules::WIKI)
//!     .with_config(r#"{"username":"bot","password":"pw","base_url":"http://wiki.local"}"#);
//! let publishing = Publishing::new("Hello", "First post", PostId(5), channel.id);
//!
//! let outcome = registry.publish(&channel, &publishing, &posts).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Wiki plugin
//!
//! The wiki plugin writes a page named `<title>-<post id>-<channel id>` under
//! `<base_url>/News/` through the wiki's edit action, then fetches the page to
//! confirm it exists. Connection failures report `"Server is down"`; any other
//! failure reports `"News not published"`. Nothing is retried.

pub mod error;
pub mod format;
pub mod plugin_trait;
pub mod registry;
pub mod wiki;

pub use error::{PluginError, Result};
pub use format::{format_text, format_title, page_name};
pub use plugin_trait::ChannelPlugin;
pub use registry::PluginRegistry;
pub use wiki::{WikiChannelConfig, WikiPlugin};
