//! Mentor character generation

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::error::ApiResult;
use crate::application::dto::{GenerationRequest, GenerationResult};
use crate::infrastructure::state::AppState;

/// Turn a drawing into a mentor character, or animate an existing one
pub async fn generate_character(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    let Json(request) = payload?;
    let result = state
        .character_generation_service
        .generate_character(request)
        .await?;
    Ok(Json(result))
}
