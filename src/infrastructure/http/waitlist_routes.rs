use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::error::ApiResult;
use crate::application::dto::{SignupRequest, SignupResponse};
use crate::infrastructure::state::AppState;

pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Json<SignupResponse>> {
    let Json(request) = payload?;
    let entry = state.signup_service.record_signup(request).await?;
    Ok(Json(SignupResponse::from(&entry)))
}
