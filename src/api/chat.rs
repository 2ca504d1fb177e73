use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

/// Forward a chat message to the configured assistant
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let chat_service = state
        .chat_service
        .as_ref()
        .ok_or_else(|| ApiError::Internal("Assistant is not configured".to_string()))?;

    let reply = chat_service.ask(&request.message).await?;

    Ok(Json(ChatResponse {
        success: true,
        reply,
    }))
}
