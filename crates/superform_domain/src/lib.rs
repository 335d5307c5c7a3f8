pub mod context;
pub mod outcome;
pub mod types;

pub use context::AuthContext;
pub use outcome::{PublishOutcome, PublishStatus};
pub use types::{Channel, ChannelId, Post, PostId, Publishing, modules};
