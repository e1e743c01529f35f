//! HTTP client for network-based API calls

use crate::session::SessionStore;
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::response::EmployeeListEnvelope;
use shared::{
    EmployeeListResponse, FilterOptions, ListQuery, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use std::sync::Arc;

/// Directory API surface used by the desk screens
///
/// Implemented over the network by [`NetworkDirectoryApi`]; screens only
/// depend on this trait so tests can count and inspect calls.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `GET /employee/all` with the composed query
    async fn list_employees(&self, query: &ListQuery) -> ClientResult<EmployeeListResponse>;

    /// `GET /employee/allfilter`
    async fn filter_options(&self) -> ClientResult<FilterOptions>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse>;
}

/// Network implementation of [`DirectoryApi`]
///
/// Reads the bearer token from the session store on every request.
#[derive(Clone)]
pub struct NetworkDirectoryApi {
    client: Client,
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for NetworkDirectoryApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkDirectoryApi")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl NetworkDirectoryApi {
    /// Create a new client from configuration
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.session.token().map(|t| format!("Bearer {}", t))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    /// Map a non-success answer to an error, keeping the server message
    fn error_from(status: StatusCode, body: &str) -> ClientError {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }
        ClientError::Api {
            status: status.as_u16(),
            message: extract_message(body),
        }
    }

    /// Non-success list answer; the body can still signal an expired session
    fn list_error(status: StatusCode, body: &str) -> ClientError {
        let envelope = serde_json::from_str::<EmployeeListEnvelope>(body).ok();
        if envelope
            .as_ref()
            .is_some_and(EmployeeListEnvelope::is_unauthorized)
        {
            return ClientError::Unauthorized;
        }
        match Self::error_from(status, body) {
            ClientError::Api {
                status,
                message: None,
            } => ClientError::Api {
                status,
                message: envelope.and_then(|e| e.error),
            },
            other => other,
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from(status, &text));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl DirectoryApi for NetworkDirectoryApi {
    async fn list_employees(&self, query: &ListQuery) -> ClientResult<EmployeeListResponse> {
        let url = self.config.url("employee/all");
        let pairs = query.query_pairs();
        tracing::debug!(url = %url, params = ?pairs, "Requesting employee page");

        let response = self
            .authorize(self.client.get(&url).query(&pairs))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::list_error(status, &text));
        }

        let envelope: EmployeeListEnvelope = serde_json::from_str(&text)?;
        if envelope.is_unauthorized() {
            return Err(ClientError::Unauthorized);
        }
        if let Some(error) = envelope.error.clone() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message.clone().or(Some(error)),
            });
        }
        envelope
            .into_page()
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".into()))
    }

    async fn filter_options(&self) -> ClientResult<FilterOptions> {
        let url = self.config.url("employee/allfilter");
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::handle_response(response).await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let url = self.config.url("auth/login");
        tracing::debug!(username = %request.username, "Sending login request");
        let response = self.client.post(&url).json(request).send().await?;
        Self::handle_response(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        let url = self.config.url("auth/register");
        tracing::debug!(username = %request.username, "Sending register request");
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_message(&text),
            });
        }
        // Success bodies vary (user object, message, or nothing at all)
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }
}

/// Pull `message` out of an error body
///
/// Accepts a plain string or a list of strings (joined with "; ").
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
