//! Voice assistant credentials for the browser SDK

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::error::ApiResult;
use crate::application::dto::AssistantTokenRequest;
use crate::domain::value_objects::AssistantToken;
use crate::infrastructure::state::AppState;

pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AssistantTokenRequest>, JsonRejection>,
) -> ApiResult<Json<AssistantToken>> {
    let Json(request) = payload?;
    let assistant = request.assistant.unwrap_or_default();
    let token = state.assistant_token_service.issue_token(&assistant)?;
    Ok(Json(token))
}
