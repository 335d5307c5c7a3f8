use superform_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No authorization code in callback")]
    MissingCode,

    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("Storage: {0}")]
    Storage(#[from] StorageError),
}
