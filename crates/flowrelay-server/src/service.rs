//! Chat orchestration: forward one message, extract one answer.

use std::sync::Arc;

use flowrelay_core::{ChatRequest, ChatResult, Confidence, FlowError, ResponseExtractor};

use crate::client::FlowClient;

/// Stateless chat handler shared by every request.
///
/// Holds only immutable state, so concurrent calls need no locking.
#[derive(Debug, Clone)]
pub struct ChatService {
    client: Arc<FlowClient>,
    extractor: ResponseExtractor,
}

impl ChatService {
    pub fn new(client: Arc<FlowClient>) -> Self {
        Self::with_extractor(client, ResponseExtractor::default())
    }

    pub fn with_extractor(client: Arc<FlowClient>, extractor: ResponseExtractor) -> Self {
        ChatService { client, extractor }
    }

    pub fn client(&self) -> &FlowClient {
        &self.client
    }

    /// Sends `request.message` to the flow engine and reshapes the answer.
    ///
    /// Upstream failures are returned as-is; a response without a known
    /// message shape still succeeds with the fallback text.
    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatResult, FlowError> {
        let conversation_id = request.resolve_conversation_id();

        let raw = self.client.send(&request.message).await?;
        let extraction = self.extractor.extract(&raw, &request.message);

        tracing::info!(
            conversation_id = %conversation_id,
            agent_type = %extraction.agent_type,
            strategy = extraction.strategy.unwrap_or("fallback"),
            "chat request completed"
        );

        Ok(ChatResult {
            response: extraction.text,
            agent_type: extraction.agent_type,
            conversation_id,
            confidence: Confidence::High,
        })
    }
}
