pub mod channel_config;
pub mod config_store;
pub mod data_store;
pub mod error;
pub mod memory;
pub mod repository;

pub use channel_config::{merge_config_value, parse_config_object};
pub use config_store::{AppConfig, HttpSettings, LinkedInSettings, TomlConfigStore};
pub use data_store::{DataFile, TomlDataStore};
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use repository::{ChannelStore, PostRepository};
