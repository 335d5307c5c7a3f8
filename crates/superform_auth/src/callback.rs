use crate::error::AuthError;
use crate::exchange::TokenExchanger;
use serde::{Deserialize, Serialize};
use serde_json::json;
use superform_domain::{AuthContext, Channel, ChannelId, modules};
use superform_storage::{ChannelStore, StorageError, merge_config_value, parse_config_object};
use tracing::{debug, info, warn};

pub const ACCESS_TOKEN_ERROR: &str = "Unable to generate access_token";

/// Query parameters of the OAuth callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
    /// Id of the channel that started the authorization flow
    pub state: Option<String>,
    pub code: Option<String>,
}

impl CallbackParams {
    pub fn new(state: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            code: Some(code.into()),
        }
    }
}

/// Where the browser is sent once the callback is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackRedirect {
    Login,
    ChannelList,
    ChannelConfigure(ChannelId),
}

impl CallbackRedirect {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::ChannelList => "/channels".to_string(),
            Self::ChannelConfigure(id) => format!("/configure/{id}"),
        }
    }
}

/// Handles OAuth callbacks for one channel module.
pub struct CallbackHandler<'a> {
    module: &'a str,
    channels: &'a dyn ChannelStore,
    exchanger: &'a dyn TokenExchanger,
}

impl<'a> CallbackHandler<'a> {
    pub fn new(
        module: &'a str,
        channels: &'a dyn ChannelStore,
        exchanger: &'a dyn TokenExchanger,
    ) -> Self {
        Self {
            module,
            channels,
            exchanger,
        }
    }

    pub fn linkedin(channels: &'a dyn ChannelStore, exchanger: &'a dyn TokenExchanger) -> Self {
        Self::new(modules::LINKEDIN, channels, exchanger)
    }

    /// Resolve the channel named by `state`, exchange the code and record the
    /// result in the channel's config.
    ///
    /// Callbacks that do not point at a channel of this handler's module go
    /// back to the channel list. Once the channel is known the user always
    /// lands on its configuration page; a failed exchange leaves
    /// [`ACCESS_TOKEN_ERROR`] in the stored config.
    pub async fn handle(
        &self,
        ctx: &AuthContext,
        params: &CallbackParams,
    ) -> Result<CallbackRedirect, AuthError> {
        if !ctx.is_logged_in() {
            debug!("Callback without a logged in user");
            return Ok(CallbackRedirect::Login);
        }

        let Some(channel) = self.resolve_channel(params).await? else {
            return Ok(CallbackRedirect::ChannelList);
        };

        let code = params.code.as_deref().filter(|c| !c.is_empty());
        let exchanged = match code {
            Some(code) => self.exchanger.exchange(code).await,
            None => Err(AuthError::MissingCode),
        };

        // Merged against the config as stored at write time, not as read above.
        match exchanged {
            Ok(token) => {
                info!(channel_id = %channel.id, "Access token granted");
                let values = token.config_values();
                self.channels
                    .modify_config(channel.id, &|current: &str| {
                        let mut map = parse_config_object(current).unwrap_or_default();
                        map.remove("error");
                        for (key, value) in &values {
                            map.insert(key.to_string(), value.clone());
                        }
                        serde_json::Value::Object(map).to_string()
                    })
                    .await?;
            }
            Err(e) => {
                warn!(channel_id = %channel.id, error = %e, "Access token exchange failed");
                let error = json!(format!("{ACCESS_TOKEN_ERROR}: {e}"));
                self.channels
                    .modify_config(channel.id, &|current: &str| {
                        merge_config_value(current, "error", error.clone())
                    })
                    .await?;
            }
        }

        Ok(CallbackRedirect::ChannelConfigure(channel.id))
    }

    async fn resolve_channel(&self, params: &CallbackParams) -> Result<Option<Channel>, AuthError> {
        let Some(state) = params.state.as_deref() else {
            return Ok(None);
        };
        let Ok(id) = state.parse::<ChannelId>() else {
            debug!(state, "Callback state is not a channel id");
            return Ok(None);
        };
        let channel = match self.channels.get(id).await {
            Ok(channel) => channel,
            Err(StorageError::NotFound(_)) => {
                debug!(channel_id = %id, "Callback for unknown channel");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        if !channel.is_module(self.module) {
            debug!(channel_id = %id, module = %channel.module, "Callback for channel of another module");
            return Ok(None);
        }
        Ok(Some(channel))
    }
}
