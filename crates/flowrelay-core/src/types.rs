//! Chat request/result types shared by the server and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body returned by the flow engine. Untrusted and only partially structured.
pub type RawFlowResponse = serde_json::Value;

/// One user message to forward to the flow engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Caller-supplied conversation id. Never checked against prior state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        ChatRequest {
            message: message.into(),
            conversation_id: None,
        }
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Returns the supplied conversation id, or a fresh UUID-v4 string when
    /// none (or an empty one) was given.
    pub fn resolve_conversation_id(&self) -> String {
        match self.conversation_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        }
    }
}

/// How the response text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// A chat message was found in the flow engine response.
    Chat,
    /// No known shape matched; the text is the fixed fallback.
    General,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Chat => "chat",
            AgentType::General => "general",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence attached to a result. Always `high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    High,
}

/// The reshaped answer for one [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    pub response: String,
    pub agent_type: AgentType,
    pub conversation_id: String,
    pub confidence: Confidence,
}
