//! Document endpoints. Documents are the source content from which
//! memory units are extracted.

use reqwest::Method;

use super::models::{DocumentResponse, ListDocumentsResponse};
use super::request::{dispatch, Endpoint};
use super::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct ListDocumentsParams {
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// List documents with pagination and optional search.
pub async fn list_documents(
    api: &ApiClient,
    agent_id: &str,
    params: &ListDocumentsParams,
) -> Result<ListDocumentsResponse, ApiError> {
    let endpoint = Endpoint::new(Method::GET, "/api/v1/agents/{agent_id}/documents")
        .path_param("agent_id", agent_id)
        .query_opt("q", params.q.as_deref())
        .query_opt("limit", params.limit)
        .query_opt("offset", params.offset);
    dispatch(api, endpoint).await
}

/// Get a specific document including its original text.
pub async fn get_document(
    api: &ApiClient,
    agent_id: &str,
    document_id: &str,
) -> Result<DocumentResponse, ApiError> {
    let endpoint = Endpoint::new(
        Method::GET,
        "/api/v1/agents/{agent_id}/documents/{document_id}",
    )
    .path_param("agent_id", agent_id)
    .path_param("document_id", document_id);
    dispatch(api, endpoint).await
}
