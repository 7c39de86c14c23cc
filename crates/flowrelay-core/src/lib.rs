//! Core data model for the flowrelay chat relay.
//!
//! Holds everything that does not touch the network: the chat request/result
//! types, environment-sourced configuration, the error taxonomy, and the
//! [`ResponseExtractor`] that digs a chat message out of a flow engine
//! response.

pub mod config;
pub mod error;
pub mod extract;
pub mod types;

// Re-export commonly used types
pub use config::{FlowConfig, ServerConfig};
pub use error::{ConfigError, FlowError};
pub use extract::{Extraction, ExtractionStrategy, ResponseExtractor, FALLBACK_RESPONSE};
pub use types::{AgentType, ChatRequest, ChatResult, Confidence, RawFlowResponse};
