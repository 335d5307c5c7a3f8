use crate::error::StorageError;
use crate::repository::{ChannelStore, PostRepository, channel_not_found, post_not_found};
use async_trait::async_trait;
use std::collections::BTreeMap;
use superform_domain::{Channel, ChannelId, Post, PostId};
use tokio::sync::RwLock;

/// In-memory channel and post storage.
///
/// Used by tests and as the read-only view returned by
/// [`TomlDataStore::snapshot`](crate::TomlDataStore::snapshot).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    channels: RwLock<BTreeMap<ChannelId, Channel>>,
    posts: RwLock<BTreeMap<PostId, Post>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(channels: Vec<Channel>, posts: Vec<Post>) -> Self {
        Self {
            channels: RwLock::new(channels.into_iter().map(|c| (c.id, c)).collect()),
            posts: RwLock::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn get_post(&self, id: PostId) -> Result<Post, StorageError> {
        self.posts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| post_not_found(id))
    }
}

#[async_trait]
impl ChannelStore for InMemoryStore {
    async fn get(&self, id: ChannelId) -> Result<Channel, StorageError> {
        self.channels
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| channel_not_found(id))
    }

    async fn list(&self) -> Result<Vec<Channel>, StorageError> {
        Ok(self.channels.read().await.values().cloned().collect())
    }

    async fn save(&self, channel: &Channel) -> Result<(), StorageError> {
        self.channels.write().await.insert(channel.id, channel.clone());
        Ok(())
    }

    async fn modify_config(
        &self,
        id: ChannelId,
        edit: &(dyn for<'e> Fn(&'e str) -> String + Send + Sync),
    ) -> Result<String, StorageError> {
        let mut channels = self.channels.write().await;
        let channel = channels.get_mut(&id).ok_or_else(|| channel_not_found(id))?;
        channel.config = edit(&channel.config);
        Ok(channel.config.clone())
    }
}
