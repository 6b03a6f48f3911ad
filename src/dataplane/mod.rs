//! Hand-written clients for the memory dataplane.
//!
//! Two clients share one operation set: [`ProxyClient`] talks to the
//! control-plane proxy routes the way a browser would, and
//! [`DataplaneClient`] talks to the dataplane directly from trusted
//! server-side code. Both are stateless between calls; every operation
//! is a single HTTP request with the response JSON passed through
//! untyped, since the dataplane owns the payload schemas.

mod client;

pub use client::{DataplaneClient, ProxyClient, DATAPLANE_URL_ENV, DEFAULT_DATAPLANE_URL};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Classification tag on memory facts, used to filter search and listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactType {
    World,
    Agent,
    Opinion,
}

impl FactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactType::World => "world",
            FactType::Agent => "agent",
            FactType::Opinion => "opinion",
        }
    }
}

/// Parameters for semantic memory search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub agent_id: String,
    pub query: String,
    pub fact_type: Vec<FactType>,
    pub thinking_budget: Option<u32>,
    pub max_tokens: Option<u32>,
    pub reranker: Option<String>,
    pub trace: Option<bool>,
}

/// Parameters for question answering over an agent's memory.
#[derive(Debug, Clone)]
pub struct ThinkParams {
    pub agent_id: String,
    pub query: String,
    pub thinking_budget: Option<u32>,
}

/// One memory unit to ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Parameters for batch memory ingestion, sync or async.
#[derive(Debug, Clone)]
pub struct BatchPutParams {
    pub agent_id: String,
    pub items: Vec<MemoryItem>,
    pub document_id: Option<String>,
}

/// Parameters for graph-visualization data retrieval.
#[derive(Debug, Clone)]
pub struct GraphDataParams {
    pub agent_id: String,
    pub fact_type: Option<FactType>,
}

/// Filters for memory-unit listing.
#[derive(Debug, Clone, Default)]
pub struct ListMemoryUnitsParams {
    pub agent_id: String,
    pub fact_type: Option<FactType>,
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Filters for document listing.
#[derive(Debug, Clone, Default)]
pub struct ListDocumentsParams {
    pub agent_id: String,
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    fact_type: &'a [FactType],
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_budget: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reranker: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<bool>,
}

#[derive(Serialize)]
struct ThinkBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_budget: Option<u32>,
}

#[derive(Serialize)]
struct BatchPutBody<'a> {
    items: &'a [MemoryItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    document_id: Option<&'a str>,
}

/// One dataplane request, ready for dispatch: method, path relative to
/// the base URL, query pairs (only the ones actually set), extra
/// headers, optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Option<Value>,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a query parameter only when the value is present.
    pub fn query_opt(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_string()));
        }
        self
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }
}

/// The dataplane operation set, shared by both clients.
///
/// Implementors provide [`dispatch`](MemoryService::dispatch); every
/// operation is a default method that builds the request description
/// and hands it off. Responses come back as untyped JSON.
#[async_trait]
pub trait MemoryService {
    /// Issue one request and return the parsed JSON response.
    async fn dispatch(&self, call: ApiCall) -> Result<Value, ClientError>;

    /// Search memory using semantic similarity. The agent id goes in
    /// the path only, never the body.
    async fn search(&self, params: &SearchParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(
            Method::POST,
            format!("/api/v1/agents/{agent}/memories/search"),
        )
        .json(&SearchBody {
            query: &params.query,
            fact_type: &params.fact_type,
            thinking_budget: params.thinking_budget,
            max_tokens: params.max_tokens,
            reranker: params.reranker.as_deref(),
            trace: params.trace,
        })?;
        self.dispatch(call).await
    }

    /// Think over memory and generate an answer.
    async fn think(&self, params: &ThinkParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(Method::POST, format!("/api/v1/agents/{agent}/think")).json(
            &ThinkBody {
                query: &params.query,
                thinking_budget: params.thinking_budget,
            },
        )?;
        self.dispatch(call).await
    }

    /// Store multiple memories in one synchronous batch.
    async fn batch_put(&self, params: &BatchPutParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(Method::POST, format!("/api/v1/agents/{agent}/memories")).json(
            &BatchPutBody {
                items: &params.items,
                document_id: params.document_id.as_deref(),
            },
        )?;
        self.dispatch(call).await
    }

    /// Store multiple memories asynchronously. If `document_id` matches
    /// an existing document the dataplane replaces it (upsert).
    async fn batch_put_async(&self, params: &BatchPutParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(
            Method::POST,
            format!("/api/v1/agents/{agent}/memories/async"),
        )
        .json(&BatchPutBody {
            items: &params.items,
            document_id: params.document_id.as_deref(),
        })?;
        self.dispatch(call).await
    }

    /// List all agents. Always bypasses intermediary caches.
    async fn list_agents(&self) -> Result<Value, ClientError> {
        let call =
            ApiCall::new(Method::GET, "/api/v1/agents").header("cache-control", "no-store");
        self.dispatch(call).await
    }

    /// Memory statistics for one agent. Schema is owned by the dataplane.
    async fn agent_stats(&self, agent_id: &str) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(agent_id);
        let call = ApiCall::new(Method::GET, format!("/api/v1/agents/{agent}/stats"));
        self.dispatch(call).await
    }

    /// Graph data for visualization, optionally filtered by fact type.
    async fn graph_data(&self, params: &GraphDataParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(Method::GET, format!("/api/v1/agents/{agent}/graph"))
            .query_opt("fact_type", params.fact_type.map(|f| f.as_str()));
        self.dispatch(call).await
    }

    /// List memory units with search and pagination filters.
    async fn list_memory_units(&self, params: &ListMemoryUnitsParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(Method::GET, format!("/api/v1/agents/{agent}/memories/list"))
            .query_opt("fact_type", params.fact_type.map(|f| f.as_str()))
            .query_opt("q", params.q.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("offset", params.offset);
        self.dispatch(call).await
    }

    /// List documents for an agent.
    async fn list_documents(&self, params: &ListDocumentsParams) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(&params.agent_id);
        let call = ApiCall::new(Method::GET, format!("/api/v1/agents/{agent}/documents"))
            .query_opt("q", params.q.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("offset", params.offset);
        self.dispatch(call).await
    }

    /// Get one document by id.
    async fn get_document(&self, agent_id: &str, document_id: &str) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(agent_id);
        let doc = urlencoding::encode(document_id);
        let call = ApiCall::new(Method::GET, format!("/api/v1/agents/{agent}/documents/{doc}"));
        self.dispatch(call).await
    }

    /// List pending async operations for an agent.
    async fn list_operations(&self, agent_id: &str) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(agent_id);
        let call = ApiCall::new(Method::GET, format!("/api/v1/agents/{agent}/operations"));
        self.dispatch(call).await
    }

    /// Cancel a pending async operation.
    async fn cancel_operation(
        &self,
        agent_id: &str,
        operation_id: &str,
    ) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(agent_id);
        let op = urlencoding::encode(operation_id);
        let call = ApiCall::new(
            Method::DELETE,
            format!("/api/v1/agents/{agent}/operations/{op}"),
        );
        self.dispatch(call).await
    }

    /// Delete one memory unit.
    async fn delete_memory_unit(
        &self,
        agent_id: &str,
        unit_id: &str,
    ) -> Result<Value, ClientError> {
        let agent = urlencoding::encode(agent_id);
        let unit = urlencoding::encode(unit_id);
        let call = ApiCall::new(
            Method::DELETE,
            format!("/api/v1/agents/{agent}/memories/{unit}"),
        );
        self.dispatch(call).await
    }
}
