use chrono::{serde::ts_seconds, DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Signed-in identity: the user id (an email) and the bearer token issued for it.
#[derive(Debug)]
pub struct Session {
    pub user_id: String,
    pub token: SecretString,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: SecretString::from(token.into()),
            signed_in_at: Utc::now(),
        }
    }
}

/// On-disk form of a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredSession {
    pub user_id: String,
    pub token: String,
    #[serde(with = "ts_seconds")]
    pub signed_in_at: DateTime<Utc>,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            token: session.token.expose_secret().to_string(),
            signed_in_at: session.signed_in_at,
        }
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            user_id: stored.user_id,
            token: SecretString::from(stored.token),
            signed_in_at: stored.signed_in_at,
        }
    }
}
