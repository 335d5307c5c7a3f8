use crate::error::StorageError;
use crate::memory::InMemoryStore;
use crate::repository::{ChannelStore, PostRepository, channel_not_found, post_not_found};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use superform_domain::{Channel, ChannelId, Post, PostId};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Channels and posts kept in a single TOML file.
///
/// Every call reads the file fresh. Writes go to a temp file first and are
/// renamed into place, so a crash never leaves a half-written data file.
pub struct TomlDataStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_file(&self) -> Result<DataFile, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(DataFile::default());
        }
        let data = tokio::fs::read_to_string(&self.path).await?;
        Ok(toml::from_str(&data)?)
    }

    pub async fn save_file(&self, file: &DataFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = toml::to_string_pretty(file)?;
        let temp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&temp, data).await?;

        // Owner read/write only; channel configs carry credentials.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&temp, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tokio::fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), channels = file.channels.len(), posts = file.posts.len(), "Saved data file");
        Ok(())
    }

    /// Read the file once into an [`InMemoryStore`], so a sequence of lookups
    /// sees a single consistent version of the data.
    pub async fn snapshot(&self) -> Result<InMemoryStore, StorageError> {
        let file = self.load_file().await?;
        Ok(InMemoryStore::from_parts(file.channels, file.posts))
    }

    pub async fn insert_post(&self, post: Post) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load_file().await?;
        file.posts.retain(|p| p.id != post.id);
        file.posts.push(post);
        self.save_file(&file).await
    }
}

#[async_trait]
impl PostRepository for TomlDataStore {
    async fn get_post(&self, id: PostId) -> Result<Post, StorageError> {
        self.load_file()
            .await?
            .posts
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| post_not_found(id))
    }
}

#[async_trait]
impl ChannelStore for TomlDataStore {
    async fn get(&self, id: ChannelId) -> Result<Channel, StorageError> {
        self.load_file()
            .await?
            .channels
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| channel_not_found(id))
    }

    async fn list(&self) -> Result<Vec<Channel>, StorageError> {
        let mut channels = self.load_file().await?.channels;
        channels.sort_by_key(|c| c.id);
        Ok(channels)
    }

    async fn save(&self, channel: &Channel) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load_file().await?;
        match file.channels.iter_mut().find(|c| c.id == channel.id) {
            Some(existing) => *existing = channel.clone(),
            None => file.channels.push(channel.clone()),
        }
        self.save_file(&file).await
    }

    async fn modify_config(
        &self,
        id: ChannelId,
        edit: &(dyn for<'e> Fn(&'e str) -> String + Send + Sync),
    ) -> Result<String, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load_file().await?;
        let channel = file
            .channels
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| channel_not_found(id))?;
        channel.config = edit(&channel.config);
        let config = channel.config.clone();
        self.save_file(&file).await?;
        Ok(config)
    }
}
