use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        // Every dataplane endpoint is proxied as-is; the dataplane owns
        // validation and the response schemas.
        .route("/api/v1/*path", any(forward_to_dataplane))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let url = format!("{}/api/v1/agents", state.dataplane_url());
    let dataplane_healthy = state
        .http
        .get(&url)
        .send()
        .await
        .map(|r| r.status().is_success())
        .unwrap_or(false);
    Json(json!({
        "status": "ok",
        "dataplane": dataplane_healthy
    }))
}

/// Forward one browser request to the dataplane: same method, path,
/// query, and body; status and body come back verbatim.
async fn forward_to_dataplane(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    let mut url = format!("{}/api/v1/{}", state.dataplane_url(), path);
    if let Some(query) = query {
        url.push('?');
        url.push_str(&query);
    }
    debug!(%request_id, %method, %url, "forwarding request to dataplane");

    // axum and reqwest 0.11 use different `http` versions, so the
    // method crosses over by name.
    let method = match reqwest::Method::from_bytes(method.as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => return StatusCode::METHOD_NOT_ALLOWED.into_response(),
    };

    let mut request = state
        .http
        .request(method, &url)
        .header(reqwest::header::CONTENT_TYPE, "application/json");
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            error!(%request_id, error = %e, "dataplane unreachable");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": format!("dataplane unreachable: {e}")})),
            )
                .into_response();
        }
    };

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    match response.bytes().await {
        Ok(bytes) => {
            if !status.is_success() {
                warn!(%request_id, status = status.as_u16(), "dataplane returned error status");
            }
            (status, [(axum::http::header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => {
            error!(%request_id, error = %e, "failed reading dataplane response");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": format!("dataplane response unreadable: {e}")})),
            )
                .into_response()
        }
    }
}
