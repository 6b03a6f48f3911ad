//! Typed bindings for the dataplane REST API, covering the
//! agent-management and document endpoints.
//!
//! Each endpoint is a free function taking an [`ApiClient`] and a
//! parameter struct; the function maps the parameters to a request
//! description (method, URL template, path/query substitution, optional
//! JSON body) and the response back to a typed value or a typed
//! [`crate::error::ApiError`]. A 422 from the dataplane is surfaced as
//! `ApiError::Validation` with the structured body preserved.
//!
//! Cancellation is cooperative: dropping a returned future before it
//! settles (losing a `tokio::select!`, an expired
//! `tokio::time::timeout`) aborts the in-flight request at the
//! transport, and the result never resolves. Dropping after completion
//! is a no-op. No retries or caching happen in this layer.

pub mod agents;
pub mod documents;
pub mod models;
mod request;

use reqwest::Client;

/// Connection to a dataplane instance for the typed bindings.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}
