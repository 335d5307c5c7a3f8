use crate::error::StorageError;
use async_trait::async_trait;
use superform_domain::{Channel, ChannelId, Post, PostId};

/// Read access to stored posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn get_post(&self, id: PostId) -> Result<Post, StorageError>;

    /// Resolve the author of a post. Fails with `NotFound` when no such post exists.
    async fn author_of(&self, id: PostId) -> Result<String, StorageError> {
        Ok(self.get_post(id).await?.user_id)
    }
}

#[async_trait]
pub trait ChannelStore: Send + Sync {
    async fn get(&self, id: ChannelId) -> Result<Channel, StorageError>;
    async fn list(&self) -> Result<Vec<Channel>, StorageError>;
    async fn save(&self, channel: &Channel) -> Result<(), StorageError>;

    /// Replace the serialized configuration of an existing channel.
    async fn update_config(&self, id: ChannelId, config: &str) -> Result<(), StorageError> {
        self.modify_config(id, &|_: &str| config.to_string()).await?;
        Ok(())
    }

    /// Rewrite an existing channel's configuration from its current value and
    /// return the stored result. Stores shared between writers apply `edit`
    /// under their write lock so concurrent edits are not lost.
    async fn modify_config(
        &self,
        id: ChannelId,
        edit: &(dyn for<'e> Fn(&'e str) -> String + Send + Sync),
    ) -> Result<String, StorageError> {
        let mut channel = self.get(id).await?;
        channel.config = edit(&channel.config);
        self.save(&channel).await?;
        Ok(channel.config)
    }
}

pub(crate) fn post_not_found(id: PostId) -> StorageError {
    StorageError::NotFound(format!("post {id}"))
}

pub(crate) fn channel_not_found(id: ChannelId) -> StorageError {
    StorageError::NotFound(format!("channel {id}"))
}
