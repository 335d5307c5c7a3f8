use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PublishStatus {
    Ok,
    Error,
}

/// Result a plugin hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub status: PublishStatus,
    pub message: Option<String>,
    pub payload: Option<serde_json::Value>,
}

impl PublishOutcome {
    pub fn ok() -> Self {
        Self {
            status: PublishStatus::Ok,
            message: None,
            payload: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: PublishStatus::Error,
            message: Some(message.into()),
            payload: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == PublishStatus::Ok
    }
}

impl std::fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.status, &self.message) {
            (PublishStatus::Ok, _) => write!(f, "OK"),
            (PublishStatus::Error, Some(msg)) => write!(f, "ERROR: {msg}"),
            (PublishStatus::Error, None) => write!(f, "ERROR"),
        }
    }
}
