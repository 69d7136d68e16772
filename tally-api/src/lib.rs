pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::TallyApiError;
use endpoints::Envelope;
use repositories::*;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3030/api";

/// Authenticated client for the expense-tracker backend.
///
/// Every response is checked against the `returncode` envelope, so callers only
/// ever see successful payloads or a [`TallyApiError`].
pub struct Client {
    inner: ApiClient,
    timeout: Option<Duration>,
}

impl Client {
    pub fn new(base_url: &str, token: &SecretString) -> Self {
        Self {
            inner: ApiClient::new(base_url).bearer_auth(token.expose_secret()),
            timeout: None,
        }
    }

    /// Bounds every request, including reading the response body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, TallyApiError>
    where
        R: ApiRequest,
        R::Response: Envelope,
    {
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.inner.send(request))
                .await
                .map_err(|_| TallyApiError::Transport("request timed out".to_string()))??,
            None => self.inner.send(request).await?,
        };
        response.status().check()?;
        Ok(response)
    }
}

pub struct Request;

impl Request {
    pub fn categories() -> CategoryRepository {
        CategoryRepository::new()
    }

    pub fn expenses() -> ExpenseRepository {
        ExpenseRepository::new()
    }

    pub fn incomes() -> IncomeRepository {
        IncomeRepository::new()
    }
}
