//! Shared request-dispatch primitive for the typed bindings: URL
//! templating, query assembly, body attachment, error mapping.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::ApiClient;
use crate::error::ApiError;

/// Description of one endpoint invocation. Path parameters are
/// substituted into `{name}` placeholders in the template; query
/// parameters are sent only when present.
#[derive(Debug)]
pub(crate) struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub path_params: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, Option<String>)>,
    pub body: Option<Value>,
}

impl Endpoint {
    pub fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn path_param(mut self, name: &'static str, value: &str) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub fn query_opt(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        self.query.push((key, value.map(|v| v.to_string())));
        self
    }

    pub fn json(mut self, body: &impl serde::Serialize) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }
}

/// Substitute `{name}` placeholders, percent-encoding each value as a
/// path segment.
fn substitute(template: &str, params: &[(&'static str, String)]) -> String {
    let mut path = template.to_string();
    for (name, value) in params {
        let placeholder = format!("{{{name}}}");
        path = path.replace(&placeholder, &urlencoding::encode(value));
    }
    path
}

pub(crate) async fn dispatch<T: DeserializeOwned>(
    api: &ApiClient,
    endpoint: Endpoint,
) -> Result<T, ApiError> {
    let path = substitute(endpoint.path, &endpoint.path_params);
    let url = format!("{}{}", api.base_url(), path);
    debug!(method = %endpoint.method, %url, "dispatching api request");

    let mut request = api
        .http()
        .request(endpoint.method, &url)
        .header(CONTENT_TYPE, "application/json");

    let query: Vec<(&str, String)> = endpoint
        .query
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();
    if !query.is_empty() {
        request = request.query(&query);
    }
    if let Some(body) = &endpoint.body {
        request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let body = response.text().await.unwrap_or_default();
        warn!(%url, "dataplane rejected request as invalid");
        let detail = serde_json::from_str(&body).ok();
        return Err(ApiError::Validation { body, detail });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %url, "api request failed");
        return Err(ApiError::Status { status, body });
    }

    Ok(response.json().await?)
}
