//! HTTP relay between a chat front-end and a LangFlow flow engine.
//!
//! Provides the [`client::FlowClient`] that calls the flow engine, the
//! [`service::ChatService`] that turns its output into a chat result, and the
//! axum router exposing `POST /chat`.

pub mod client;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
pub mod telemetry;
