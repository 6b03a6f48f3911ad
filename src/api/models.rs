//! Request and response shapes for the typed bindings. These are pure
//! data-transfer types; validation is the dataplane's responsibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Big Five personality scores for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfileResponse {
    pub agent_id: String,
    pub personality: PersonalityTraits,
    pub bias_strength: f32,
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentProfileResponse>,
}

/// Create-or-update payload. Missing fields are auto-filled with
/// defaults by the dataplane.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalityTraits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_strength: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePersonalityRequest {
    pub personality: PersonalityTraits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_strength: Option<f32>,
}

/// New background text to merge into an agent's existing background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBackgroundRequest {
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_personality: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundResponse {
    pub agent_id: String,
    pub background: String,
}

/// A source document from which memory units were extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub agent_id: String,
    pub original_text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentResponse>,
    #[serde(default)]
    pub total: u64,
}
