mod models;

use crate::common::Session;
pub use models::AuthClientError;
use models::*;
use reqwest::Client;
use std::time::Duration;

pub struct SignInClient {
    http_client: Client,
    api_url: String,
}

impl SignInClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthClientError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    pub async fn sign_in(&self, user_id: &str, password: &str) -> Result<Session, AuthClientError> {
        let url = format!("{}/auth/signin", self.api_url);
        let req = SignInRequest { user_id, password };

        let resp = self
            .http_client
            .post(&url)
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<SignInResponse>()
            .await?;

        session_from_response(resp, user_id)
    }
}

fn session_from_response(resp: SignInResponse, user_id: &str) -> Result<Session, AuthClientError> {
    if !resp.returncode.is_success() {
        return Err(AuthClientError::Rejected(
            resp.message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Invalid user id or password".to_string()),
        ));
    }

    let token = resp
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthClientError::ServerError("Missing token".into()))?;
    let user_id = resp
        .data
        .map(|d| d.user_id)
        .unwrap_or_else(|| user_id.to_string());

    Ok(Session::new(user_id, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parse(json: &str) -> SignInResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_successful_sign_in() {
        let resp = parse(
            r#"{"returncode": "200", "message": "ok", "data": {"user_id": "me@example.com"}, "token": "abc"}"#,
        );
        let session = session_from_response(resp, "typed@example.com").unwrap();
        assert_eq!(session.user_id, "me@example.com");
        assert_eq!(session.token.expose_secret(), "abc");
    }

    #[test]
    fn test_numeric_return_code() {
        let resp = parse(r#"{"returncode": 200, "token": "abc"}"#);
        let session = session_from_response(resp, "typed@example.com").unwrap();
        assert_eq!(session.user_id, "typed@example.com");
    }

    #[test]
    fn test_rejected_sign_in_surfaces_message() {
        let resp = parse(r#"{"returncode": "401", "message": "Wrong password"}"#);
        let err = session_from_response(resp, "me@example.com").unwrap_err();
        assert_eq!(err.to_string(), "Wrong password");
    }

    #[test]
    fn test_missing_token() {
        let resp = parse(r#"{"returncode": "200"}"#);
        assert!(matches!(
            session_from_response(resp, "me@example.com"),
            Err(AuthClientError::ServerError(_))
        ));
    }
}
