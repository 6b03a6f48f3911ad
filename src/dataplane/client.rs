use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiCall, MemoryService};
use crate::error::{ClientError, ErrorScope};

/// Environment variable selecting the dataplane base URL for
/// server-side calls.
pub const DATAPLANE_URL_ENV: &str = "MEMORA_CP_DATAPLANE_API_URL";

/// Fallback when the environment variable is not set.
pub const DEFAULT_DATAPLANE_URL: &str = "http://localhost:8080";

/// Shared request helper: base URL, reqwest client, error scope.
#[derive(Debug, Clone)]
struct DataplaneHttp {
    client: Client,
    base_url: String,
    scope: ErrorScope,
}

impl DataplaneHttp {
    fn new(base_url: impl Into<String>, scope: ErrorScope) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            scope,
        }
    }

    async fn request_json<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, call.path);
        debug!(method = %call.method, %url, "dispatching dataplane request");

        let mut request = self
            .client
            .request(call.method, &url)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in &call.headers {
            request = request.header(*name, *value);
        }
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %url, "dataplane request failed");
            return Err(ClientError::Api {
                scope: self.scope,
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Client for the control-plane proxy routes, the same path a browser
/// takes. `origin` is the control-plane address; all requests go to
/// `{origin}/api/v1/...` and failures read `API Error: ...`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: DataplaneHttp,
}

impl ProxyClient {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            http: DataplaneHttp::new(origin, ErrorScope::ControlPlane),
        }
    }

    pub fn origin(&self) -> &str {
        &self.http.base_url
    }

    /// Typed access for callers that know the response shape. No
    /// runtime schema validation happens; trust is placed in the
    /// dataplane contract.
    pub async fn request_json<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T, ClientError> {
        self.http.request_json(call).await
    }
}

#[async_trait]
impl MemoryService for ProxyClient {
    async fn dispatch(&self, call: ApiCall) -> Result<Value, ClientError> {
        self.http.request_json(call).await
    }
}

/// Server-side client that calls the dataplane directly. Only for
/// server-execution contexts that can reach the dataplane network;
/// failures read `Dataplane Error: ...`.
#[derive(Debug, Clone)]
pub struct DataplaneClient {
    http: DataplaneHttp,
}

impl DataplaneClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: DataplaneHttp::new(base_url, ErrorScope::Dataplane),
        }
    }

    /// Read the base URL from `MEMORA_CP_DATAPLANE_API_URL`, falling
    /// back to the local default. Read once at construction.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(DATAPLANE_URL_ENV).unwrap_or_else(|_| DEFAULT_DATAPLANE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    /// Typed access for callers that know the response shape.
    pub async fn request_json<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T, ClientError> {
        self.http.request_json(call).await
    }
}

#[async_trait]
impl MemoryService for DataplaneClient {
    async fn dispatch(&self, call: ApiCall) -> Result<Value, ClientError> {
        self.http.request_json(call).await
    }
}
