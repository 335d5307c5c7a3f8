//! OAuth callback handling for channels that authorize through a provider.
//!
//! The callback's `state` parameter carries the id of the channel that
//! started the flow. [`CallbackHandler`] checks it against the channel store,
//! trades the `code` for a token through a [`TokenExchanger`] and records the
//! outcome in the channel's configuration.

pub mod callback;
pub mod error;
pub mod exchange;

pub use callback::{ACCESS_TOKEN_ERROR, CallbackHandler, CallbackParams, CallbackRedirect};
pub use error::AuthError;
pub use exchange::{AccessToken, TokenExchanger};
