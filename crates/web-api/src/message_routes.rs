use application::BroadcastEvent;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use domain::Message;

use crate::{
    error::ApiError,
    state::AppState,
    validation::{self, AddMessagePayload},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/addMessage", post(add_message))
        .route("/getMessages", get(get_messages))
}

async fn add_message(
    State(state): State<AppState>,
    payload: Result<Json<AddMessagePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let new_message = validation::new_message(payload)?;
    let message = state.message_service.create(new_message).await?;

    // 广播不影响响应结果
    let broadcaster = state.broadcaster.clone();
    let event = BroadcastEvent::message_update(&message);
    tokio::spawn(async move {
        if let Err(err) = broadcaster.broadcast(event).await {
            tracing::warn!(error = %err, "failed to broadcast message update");
        }
    });

    Ok((StatusCode::CREATED, Json(message)))
}

async fn get_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.message_service.list_all().await)
}
