//! HTTP handler modules for the relay API.
//!
//! Handlers are thin: decode the request, delegate to
//! [`crate::service::ChatService`], encode the response.

pub mod chat;
pub mod health;
