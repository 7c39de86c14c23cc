//! Chat relay handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::schema::chat::{ChatQuery, ChatReply};
use crate::state::AppState;

/// Forwards the query to the flow engine and returns the extracted message.
///
/// `POST /chat`
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatQuery>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(query) = body?;

    let result = state.chat.handle_chat(query.into()).await.map_err(|err| {
        tracing::error!(error = %err, "chat request failed");
        ApiError::from(err)
    })?;

    Ok(Json(ChatReply {
        message: result.response,
    }))
}
