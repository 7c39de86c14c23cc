//! Application state shared by the axum handlers.

use std::sync::Arc;

use flowrelay_core::{FlowConfig, FlowError};

use crate::client::FlowClient;
use crate::service::ChatService;

/// Shared application state for the HTTP server.
///
/// Built once at startup and cloned into each handler; the inner
/// [`ChatService`] is immutable.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Creates state with a [`FlowClient`] for the given configuration.
    pub fn new(config: FlowConfig) -> Result<Self, FlowError> {
        let client = Arc::new(FlowClient::new(config)?);
        Ok(Self::from_service(ChatService::new(client)))
    }

    pub fn from_service(service: ChatService) -> Self {
        AppState {
            chat: Arc::new(service),
        }
    }
}
