use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub user_id: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReturnCode {
    Text(String),
    Number(i64),
}

impl ReturnCode {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Text(code) => code == "200",
            Self::Number(code) => *code == 200,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub returncode: ReturnCode,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SignInData>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInData {
    pub user_id: String,
}

#[derive(Debug, Error)]
pub enum AuthClientError {
    #[error("Failed to connect to the server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("Server error: {0}")]
    ServerError(String),
}
