use thiserror::Error;
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug, Error)]
pub enum TallyApiError {
    /// The server answered but refused the operation (`returncode != "200"`).
    #[error("{message}")]
    Rejected { returncode: String, message: String },

    /// The bearer token is no longer accepted.
    #[error("Session expired ({0})")]
    Unauthorized(StatusCode),

    #[error("Failed to connect to the server: {0}")]
    Transport(String),
}

impl TallyApiError {
    pub fn rejected(returncode: impl Into<String>, message: Option<&str>) -> Self {
        let returncode = returncode.into();
        let message = match message {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => format!("Request failed with return code {}", returncode),
        };
        Self::Rejected {
            returncode,
            message,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Text suitable for a notification. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Unauthorized(_) => "Your session has expired, please sign in again".to_string(),
            Self::Transport(_) => "Failed to connect to the server".to_string(),
        }
    }
}

fn invalidates_session(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::MOVED_PERMANENTLY
}

impl From<ApiError> for TallyApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, _) | ApiError::ServerError(status, _)
                if invalidates_session(status) =>
            {
                TallyApiError::Unauthorized(status)
            }
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                TallyApiError::Transport(format!("({}) {}", status, detail))
            }
            e => TallyApiError::Transport(e.to_string()),
        }
    }
}
