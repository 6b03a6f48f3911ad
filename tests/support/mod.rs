//! In-process mock dataplane for integration tests. Records every
//! request it sees and serves canned responses, including a small
//! document store so upsert behavior is observable.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use dashmap::DashMap;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    documents: Arc<DashMap<String, Value>>,
}

pub struct MockDataplane {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    documents: Arc<DashMap<String, Value>>,
}

impl MockDataplane {
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            documents: Arc::new(DashMap::new()),
        };
        let requests = state.requests.clone();
        let documents = state.documents.clone();

        let app = Router::new().fallback(handle).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            documents,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }
}

fn profile(agent_id: &str) -> Value {
    json!({
        "agent_id": agent_id,
        "personality": {
            "openness": 0.7,
            "conscientiousness": 0.6,
            "extraversion": 0.4,
            "agreeableness": 0.8,
            "neuroticism": 0.2
        },
        "bias_strength": 0.5,
        "background": "I roast my own coffee."
    })
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body_json: Option<Value> = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let mut recorded_headers = HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(value) = value.to_str() {
            recorded_headers.insert(name.as_str().to_string(), value.to_string());
        }
    }
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(|q| q.to_string()),
        headers: recorded_headers,
        body: body_json.clone(),
    });

    let path = uri.path().trim_matches('/').to_string();
    let segments: Vec<&str> = path.split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "v1", "agents"]) => {
            Json(json!({"agents": [profile("a1")]})).into_response()
        }

        // Sentinel agents for the error paths.
        (_, ["api", "v1", "agents", "invalid", ..]) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [
                    {"loc": ["path", "agent_id"], "msg": "agent id is not valid", "type": "value_error"}
                ]
            })),
        )
            .into_response(),
        (_, ["api", "v1", "agents", "broken", ..]) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "dataplane exploded").into_response()
        }

        ("GET", ["api", "v1", "agents", agent, "stats"]) => {
            if *agent == "slow" {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Json(json!({"nodes": 42, "links": 17})).into_response()
        }

        ("GET", ["api", "v1", "agents", agent, "profile"]) => {
            Json(profile(agent)).into_response()
        }
        ("PUT", ["api", "v1", "agents", agent, "profile"]) => {
            let body = body_json.unwrap_or_else(|| json!({}));
            Json(json!({
                "agent_id": agent,
                "personality": body["personality"],
                "bias_strength": body.get("bias_strength").cloned().unwrap_or(json!(0.5)),
                "background": "I roast my own coffee."
            }))
            .into_response()
        }
        ("POST", ["api", "v1", "agents", agent, "background"]) => {
            let body = body_json.unwrap_or_else(|| json!({}));
            Json(json!({"agent_id": agent, "background": body["background"]})).into_response()
        }
        ("PUT", ["api", "v1", "agents", agent]) => Json(profile(agent)).into_response(),

        ("GET", ["api", "v1", "agents", _, "documents"]) => {
            let documents: Vec<Value> = state.documents.iter().map(|e| e.value().clone()).collect();
            let total = documents.len();
            Json(json!({"documents": documents, "total": total})).into_response()
        }
        ("GET", ["api", "v1", "agents", agent, "documents", doc]) => {
            match state.documents.get(*doc) {
                Some(entry) => Json(entry.value().clone()).into_response(),
                None if *doc == "missing" => (
                    StatusCode::NOT_FOUND,
                    Json(json!({"detail": "document not found"})),
                )
                    .into_response(),
                None => Json(json!({
                    "id": doc,
                    "agent_id": agent,
                    "original_text": "standing order: two flat whites",
                    "created_at": "2026-01-05T09:30:00Z"
                }))
                .into_response(),
            }
        }

        ("POST", ["api", "v1", "agents", _, "memories", "search"]) => {
            Json(json!({"results": [{"text": "espresso", "fact_type": "world"}]})).into_response()
        }
        ("POST", ["api", "v1", "agents", _, "think"]) => {
            Json(json!({"answer": "you prefer espresso"})).into_response()
        }
        ("POST", ["api", "v1", "agents", _, "memories"]) => {
            let count = body_json
                .as_ref()
                .and_then(|b| b.get("items"))
                .and_then(|i| i.as_array())
                .map(|i| i.len())
                .unwrap_or(0);
            Json(json!({"items_created": count})).into_response()
        }
        ("POST", ["api", "v1", "agents", agent, "memories", "async"]) => {
            let body = body_json.unwrap_or_else(|| json!({}));
            let doc_id = body
                .get("document_id")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            let text = body
                .get("items")
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|i| i.get("content").and_then(|c| c.as_str()))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            // Upsert: a colliding document_id replaces the stored document.
            state.documents.insert(
                doc_id.clone(),
                json!({
                    "id": doc_id,
                    "agent_id": agent,
                    "original_text": text,
                    "created_at": "2026-01-05T09:30:00Z"
                }),
            );
            Json(json!({"operation_id": Uuid::new_v4(), "status": "pending"})).into_response()
        }

        ("GET", ["api", "v1", "agents", _, "memories", "list"]) => {
            Json(json!({"units": [], "total": 0})).into_response()
        }
        ("GET", ["api", "v1", "agents", _, "graph"]) => {
            Json(json!({"nodes": [], "edges": []})).into_response()
        }
        ("GET", ["api", "v1", "agents", _, "operations"]) => {
            Json(json!({"operations": [{"operation_id": "op-1", "status": "pending"}]}))
                .into_response()
        }
        ("DELETE", ["api", "v1", "agents", _, "operations", op]) => {
            Json(json!({"operation_id": op, "status": "cancelled"})).into_response()
        }
        ("DELETE", ["api", "v1", "agents", _, "memories", unit]) => {
            Json(json!({"deleted": unit})).into_response()
        }

        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response(),
    }
}
