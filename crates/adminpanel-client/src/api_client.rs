//! HTTP client for communicating with the admin API

use crate::api::{AdminApi, endpoints};
use crate::error::{ClientError, Result};
use crate::session::Session;
use adminpanel_core::config::ApiConfig;
use adminpanel_core::{ChangePasswordRequest, RegisterRequest, SubAdmin};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every path is appended to
    pub base_url: String,
    /// Total timeout applied to each request
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Settings for `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ApiConfig> for ClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// API client for making authenticated HTTP requests to the admin API
///
/// Every request is passed through [`ApiClient::authorize`] right before it
/// is sent, which attaches `Authorization: Bearer <token>` when the
/// session has a token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base URL is not http(s), or
    /// an HTTP error if the underlying client cannot be built
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("adminpanel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Base URL requests are sent to, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Attach the session's bearer token, if any, to an outgoing request
    pub async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, method: &'static str, path: &str, request: RequestBuilder) -> Result<Response> {
        let request = self.authorize(request).await;
        debug!(method, path, "sending request");

        let response = request.send().await.map_err(|e| {
            warn!(method, path, error = %e, "request failed");
            ClientError::Http(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(method, path, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_body(status, &body);
        warn!(method, path, status = status.as_u16(), error = %err, "API returned an error");
        Err(err)
    }

    /// `GET` `path` and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that does not decode as `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send("GET", path, self.client.get(self.url(path))).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `POST` a JSON `body` to `path`, returning whatever JSON came back
    ///
    /// An empty response body reads as `null`; a non-JSON body is returned
    /// as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value> {
        let response = self
            .send("POST", path, self.client.post(self.url(path)).json(body))
            .await?;
        read_lenient(response).await
    }

    /// `DELETE` `path`, returning whatever JSON came back
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn delete(&self, path: &str) -> Result<serde_json::Value> {
        let response = self
            .send("DELETE", path, self.client.delete(self.url(path)))
            .await?;
        read_lenient(response).await
    }
}

async fn read_lenient(response: Response) -> Result<serde_json::Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn list_admins(&self) -> Result<Vec<SubAdmin>> {
        self.get(endpoints::ADMINS).await
    }

    async fn register_sub_admin(&self, request: &RegisterRequest) -> Result<()> {
        self.post(endpoints::REGISTER, request).await?;
        Ok(())
    }

    async fn delete_admin(&self, id: i64) -> Result<()> {
        self.delete(&endpoints::delete(id)).await?;
        Ok(())
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.post(endpoints::CHANGE_PASSWORD, request).await?;
        Ok(())
    }
}
