use crate::error::StorageError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const LINKEDIN_API_KEY_ENV: &str = "LINKEDIN_API_KEY";
pub const LINKEDIN_API_SECRET_ENV: &str = "LINKEDIN_API_SECRET";

/// Outbound HTTP settings shared by every channel plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("superform-rs/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// LinkedIn application credentials used by the OAuth callback.
#[derive(Clone)]
pub struct LinkedInSettings {
    pub api_key: String,
    pub api_secret: SecretString,
}

impl std::fmt::Debug for LinkedInSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInSettings")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for LinkedInSettings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct LinkedInSettingsHelper<'a> {
            api_key: &'a str,
            api_secret: &'a str,
        }

        LinkedInSettingsHelper {
            api_key: &self.api_key,
            api_secret: self.api_secret.expose_secret(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LinkedInSettings {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct LinkedInSettingsHelper {
            api_key: String,
            api_secret: String,
        }

        let helper = LinkedInSettingsHelper::deserialize(deserializer)?;
        Ok(LinkedInSettings {
            api_key: helper.api_key,
            api_secret: SecretString::new(helper.api_secret.into()),
        })
    }
}

impl LinkedInSettings {
    /// Read credentials from `LINKEDIN_API_KEY` / `LINKEDIN_API_SECRET`.
    /// Returns `None` unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup(LINKEDIN_API_KEY_ENV).filter(|v| !v.is_empty())?;
        let api_secret = lookup(LINKEDIN_API_SECRET_ENV).filter(|v| !v.is_empty())?;
        Some(Self {
            api_key,
            api_secret: SecretString::new(api_secret.into()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub linkedin: Option<LinkedInSettings>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of plain text
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpSettings::default(),
            linkedin: None,
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// LinkedIn credentials from the file, falling back to the environment.
    pub fn linkedin_settings(&self) -> Option<LinkedInSettings> {
        self.linkedin.clone().or_else(LinkedInSettings::from_env)
    }
}

pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<AppConfig, StorageError> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&data)?)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, data)?;

        // Set restrictive permissions on Unix (0600 = owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}
