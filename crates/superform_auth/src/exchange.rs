use crate::error::AuthError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

/// Access token granted for a channel.
#[derive(Clone)]
pub struct AccessToken {
    pub token: SecretString,
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            token: SecretString::new(token.into()),
            expires_at: None,
        }
    }

    /// Token expiring `expires_in` seconds after `issued_at`. An expiry past
    /// the representable range is treated as unknown.
    pub fn expiring(token: impl Into<String>, issued_at: DateTime<Utc>, expires_in: i64) -> Self {
        Self {
            expires_at: Duration::try_seconds(expires_in)
                .and_then(|lifetime| issued_at.checked_add_signed(lifetime)),
            ..Self::new(token)
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// Fields merged into the channel config once the token is granted.
    pub(crate) fn config_values(&self) -> Vec<(&'static str, Value)> {
        let mut values = vec![("access_token", json!(self.token.expose_secret()))];
        if let Some(at) = self.expires_at {
            values.push(("token_expires_at", json!(at.to_rfc3339())));
        }
        values
    }
}

/// Trades an OAuth authorization code for an access token.
///
/// The HTTP exchange with the provider lives behind this trait; callback
/// handling only needs to know whether a token came back.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange(&self, code: &str) -> Result<AccessToken, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiring_token() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let token = AccessToken::expiring("abc", issued, 3600);
        assert_eq!(token.expires_at, Some(issued + Duration::hours(1)));
        assert!(!token.is_expired_at(issued + Duration::minutes(59)));
        assert!(token.is_expired_at(issued + Duration::hours(1)));
    }

    #[test]
    fn test_expiring_out_of_range_has_no_expiry() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(AccessToken::expiring("abc", issued, i64::MAX).expires_at, None);
        assert_eq!(AccessToken::expiring("abc", issued, i64::MIN).expires_at, None);
        // In range for the duration, past the last representable date
        assert_eq!(
            AccessToken::expiring("abc", DateTime::<Utc>::MAX_UTC, 60).expires_at,
            None
        );
    }

    #[test]
    fn test_token_without_expiry_never_expires() {
        let token = AccessToken::new("abc");
        assert!(!token.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", AccessToken::new("very-secret"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_config_values() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let values = AccessToken::expiring("abc", issued, 60).config_values();
        assert_eq!(values[0], ("access_token", json!("abc")));
        assert_eq!(values[1].0, "token_expires_at");
        assert_eq!(values[1].1, json!("2024-01-01T00:01:00+00:00"));
    }
}
