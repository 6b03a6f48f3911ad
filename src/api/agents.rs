//! Agent-management endpoints.

use reqwest::Method;
use serde_json::Value;

use super::models::{
    AddBackgroundRequest, AgentListResponse, AgentProfileResponse, BackgroundResponse,
    CreateAgentRequest, UpdatePersonalityRequest,
};
use super::request::{dispatch, Endpoint};
use super::ApiClient;
use crate::error::ApiError;

/// List all agents with their profiles.
pub async fn list_agents(api: &ApiClient) -> Result<AgentListResponse, ApiError> {
    dispatch(api, Endpoint::new(Method::GET, "/api/v1/agents")).await
}

/// Memory statistics for an agent. The dataplane does not publish a
/// schema for this response, so it stays untyped.
pub async fn agent_stats(api: &ApiClient, agent_id: &str) -> Result<Value, ApiError> {
    let endpoint = Endpoint::new(Method::GET, "/api/v1/agents/{agent_id}/stats")
        .path_param("agent_id", agent_id);
    dispatch(api, endpoint).await
}

/// Personality traits and background for an agent. The dataplane
/// auto-creates the agent with defaults if it does not exist.
pub async fn get_agent_profile(
    api: &ApiClient,
    agent_id: &str,
) -> Result<AgentProfileResponse, ApiError> {
    let endpoint = Endpoint::new(Method::GET, "/api/v1/agents/{agent_id}/profile")
        .path_param("agent_id", agent_id);
    dispatch(api, endpoint).await
}

/// Update an agent's Big Five traits and bias strength.
pub async fn update_agent_personality(
    api: &ApiClient,
    agent_id: &str,
    request: &UpdatePersonalityRequest,
) -> Result<AgentProfileResponse, ApiError> {
    let endpoint = Endpoint::new(Method::PUT, "/api/v1/agents/{agent_id}/profile")
        .path_param("agent_id", agent_id)
        .json(request)?;
    dispatch(api, endpoint).await
}

/// Add background information, merged with any existing background by
/// the dataplane.
pub async fn add_agent_background(
    api: &ApiClient,
    agent_id: &str,
    request: &AddBackgroundRequest,
) -> Result<BackgroundResponse, ApiError> {
    let endpoint = Endpoint::new(Method::POST, "/api/v1/agents/{agent_id}/background")
        .path_param("agent_id", agent_id)
        .json(request)?;
    dispatch(api, endpoint).await
}

/// Create a new agent or update an existing one. Missing fields are
/// filled with defaults.
pub async fn create_or_update_agent(
    api: &ApiClient,
    agent_id: &str,
    request: &CreateAgentRequest,
) -> Result<AgentProfileResponse, ApiError> {
    let endpoint = Endpoint::new(Method::PUT, "/api/v1/agents/{agent_id}")
        .path_param("agent_id", agent_id)
        .json(request)?;
    dispatch(api, endpoint).await
}
