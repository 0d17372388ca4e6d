use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::dto::message_dto::SendMessageRequest;
use crate::middleware::auth::Claims;
use crate::models::message::MessageSender;
use crate::AppState;

/// Reading the thread marks the coach's messages as read.
#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    state
        .message_service
        .mark_read(user_id, MessageSender::Coach)
        .await?;
    let messages = state.message_service.thread(user_id).await?;
    Ok(Json(messages).into_response())
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendMessageRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user_id = claims.user_id()?;

    let message = state
        .message_service
        .send(user_id, MessageSender::Learner, &req.body)
        .await?;

    let payload = json!({
        "event": "learner_message",
        "user_id": user_id,
        "message_id": message.id,
    });
    if let Err(e) = state
        .notification_service
        .enqueue("learner_message", &payload)
        .await
    {
        tracing::error!(error = ?e, "failed to enqueue message webhook");
    }

    Ok((StatusCode::CREATED, Json(message)).into_response())
}
