//! Schema types for the chat and health endpoints.

use serde::{Deserialize, Serialize};

use flowrelay_core::ChatRequest;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatQuery {
    /// The user's message.
    pub query: String,
    /// Optional id to keep a conversation together on the client side.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl From<ChatQuery> for ChatRequest {
    fn from(query: ChatQuery) -> Self {
        ChatRequest {
            message: query.query,
            conversation_id: query.conversation_id,
        }
    }
}

/// Successful `POST /chat` response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
