//! Talking-head lesson generation

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::error::ApiResult;
use crate::application::dto::{LessonResult, LessonSubmission};
use crate::infrastructure::state::AppState;

pub async fn generate_lesson(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LessonSubmission>, JsonRejection>,
) -> ApiResult<Json<LessonResult>> {
    let Json(submission) = payload?;
    let result = state.lesson_service.generate_lesson(submission).await?;
    Ok(Json(result))
}
