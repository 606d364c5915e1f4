//! HTTP client wrapper
//!
//! This module implements the client used for every backend call. It binds
//! requests to a fixed base path with a flat timeout, carries the shared
//! bearer-token header, and flattens every failure into a single
//! [`ApiError`] shape.

use parking_lot::RwLock;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Error string used when a transport failure carries no description
pub const NETWORK_ERROR: &str = "network_error";

// =============================================================================
// Error Types
// =============================================================================

/// Normalized API error
///
/// Every failed request ends up here, whether the backend rejected it or
/// the request never completed. Callers probe [`ApiError::error`] and need
/// not tell the two apart.
///
/// # Examples
/// ```
/// use campus_client::http::ApiError;
///
/// let error = ApiError::from_response(401, r#"{"error":"invalid_credentials"}"#);
/// assert_eq!(error.error(), "invalid_credentials");
/// assert_eq!(error.status(), Some(401));
///
/// let error = ApiError::transport("");
/// assert_eq!(error.error(), "network_error");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status, absent when no response arrived
    status: Option<u16>,
    /// Message surfaced to the user
    error: String,
    /// Structured error body, kept verbatim
    body: Option<Value>,
}

impl ApiError {
    /// Create a bare error with only a message
    pub fn new(error: impl Into<String>) -> Self {
        Self { status: None, error: error.into(), body: None }
    }

    /// Error for a request that never completed
    pub fn transport(description: impl Into<String>) -> Self {
        let description = description.into();
        if description.trim().is_empty() {
            Self::new(NETWORK_ERROR)
        } else {
            Self::new(description)
        }
    }

    /// Error for a request that exceeded the client timeout
    pub fn timeout(timeout: Duration) -> Self {
        Self::new(format!("timeout of {}ms exceeded", timeout.as_millis()))
    }

    /// Error for a non-2xx response
    ///
    /// A JSON body is kept verbatim. Its `error` field becomes the message
    /// when present; otherwise the message names the status code.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) if !value.is_null() => {
                let error = value
                    .get("error")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| status_message(status));

                Self { status: Some(status), error, body: Some(value) }
            }
            _ => Self { status: Some(status), error: status_message(status), body: None },
        }
    }

    /// Error for a 2xx body that does not have the expected shape
    pub fn invalid_response(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("invalid_response: {}", detail))
    }

    /// Get the HTTP status code, if a response arrived
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the error message
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Get the structured error body returned by the backend
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether the request failed before any response arrived
    pub fn is_transport_failure(&self) -> bool {
        self.status.is_none()
    }

    /// The `{error}` shape handed to callers
    ///
    /// Returns the backend body verbatim when there is one.
    pub fn to_json(&self) -> Value {
        match &self.body {
            Some(body) => body.clone(),
            None => serde_json::json!({ "error": self.error }),
        }
    }
}

fn status_message(status: u16) -> String {
    format!("Request failed with status code {}", status)
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error)
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method used by the backend endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request (collection reads)
    Get,
    /// POST request (authentication)
    Post,
}

impl HttpMethod {
    /// Method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Request against a path below the configured base path
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base path (e.g., "/schools")
    pub path: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// JSON request body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a new GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: HttpMethod::Get, path: path.into(), headers: HashMap::new(), body: None }
    }

    /// Create a new POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self { method: HttpMethod::Post, path: path.into(), headers: HashMap::new(), body: None }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body from JSON
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend origin (e.g., "http://localhost:8080")
    pub service_url: String,
    /// Path prefix shared by every endpoint
    pub base_path: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080".to_string(),
            base_path: "/api/v1".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("SmartCampus/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config with a service URL
    pub fn new(service_url: impl Into<String>) -> Self {
        Self { service_url: service_url.into(), ..Default::default() }
    }

    /// Set the base path
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    ///
    /// `Authorization` is owned by [`ApiClient::configure_auth`]; a config
    /// carrying it is rejected by [`ApiClient::new`].
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    fn validate(&self) -> crate::Result<()> {
        if self.service_url.trim().is_empty() {
            return Err(crate::Error::InvalidConfig("service_url must not be empty".to_string()));
        }
        if self.default_headers.keys().any(|key| key.eq_ignore_ascii_case(AUTHORIZATION.as_str())) {
            return Err(crate::Error::InvalidConfig(
                "authorization is managed by the session and cannot be a default header".to_string(),
            ));
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(crate::Error::InvalidConfig(format!(
                "base_path must start with '/': {}",
                self.base_path
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// HTTP client for the SmartCampus backend
///
/// Clones share the authorization header, so configuring auth on one
/// handle applies to requests made through every other.
///
/// # Examples
/// ```
/// use campus_client::http::{ApiClient, ApiClientConfig};
///
/// let client = ApiClient::new(ApiClientConfig::new("http://localhost:8080")).unwrap();
///
/// client.configure_auth("abc");
/// assert_eq!(client.authorization(), Some("Bearer abc".to_string()));
///
/// client.configure_auth("");
/// assert_eq!(client.authorization(), None);
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client
    client: ReqwestClient,
    /// Configuration
    config: Arc<ApiClientConfig>,
    /// Authorization header value shared by all clones
    authorization: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiClientConfig) -> crate::Result<Self> {
        config.validate()?;

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config: Arc::new(config), authorization: Arc::new(RwLock::new(None)) })
    }

    /// Set or clear the bearer token used by all subsequent requests
    ///
    /// An empty token removes the header.
    pub fn configure_auth(&self, token: &str) {
        let value = if token.is_empty() { None } else { Some(format!("Bearer {}", token)) };
        *self.authorization.write() = value;
    }

    /// Current authorization header value
    pub fn authorization(&self) -> Option<String> {
        self.authorization.read().clone()
    }

    /// GET `path` and parse the body as `T`
    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::get(path)).await
    }

    /// POST `body` as JSON to `path` and parse the response as `T`
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::post(path)
            .json_body(body)
            .map_err(|e| ApiError::new(format!("invalid_request: {}", e)))?;
        self.execute(request).await
    }

    /// Execute a request
    pub async fn execute<T>(&self, request: ApiRequest) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(&request.path);
        tracing::debug!("{} {}", request.method.as_str(), url);

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        let mut http_request = req.build().map_err(|e| self.transport_error(&e))?;

        // Authorization comes from the session token only
        let headers = http_request.headers_mut();
        headers.remove(AUTHORIZATION);
        if let Some(value) = self.authorization() {
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ApiError::new(format!("invalid_request: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let response =
            self.client.execute(http_request).await.map_err(|e| self.transport_error(&e))?;

        self.parse_response(response).await
    }

    /// Parse a response into `T` or a normalized error
    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_response(status.as_u16(), &body);
            tracing::debug!("Request rejected with status {}: {}", status.as_u16(), error);
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(&e))?;

        // An empty success body reads as JSON null
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"null" } else { &bytes };

        serde_json::from_slice(body).map_err(ApiError::invalid_response)
    }

    fn transport_error(&self, error: &reqwest::Error) -> ApiError {
        let api_error = if error.is_timeout() {
            ApiError::timeout(self.config.timeout)
        } else {
            ApiError::transport(error.to_string())
        };
        tracing::debug!("Request failed before a response arrived: {}", api_error);
        api_error
    }

    fn url(&self, path: &str) -> String {
        let service_url = self.config.service_url.trim_end_matches('/');
        let base_path = self.config.base_path.trim_end_matches('/');

        if path.starts_with('/') {
            format!("{}{}{}", service_url, base_path, path)
        } else {
            format!("{}{}/{}", service_url, base_path, path)
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }
}

// =============================================================================
// Tests
// =============================================================================
