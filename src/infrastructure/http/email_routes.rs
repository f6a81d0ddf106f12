//! Transactional email endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::error::ApiResult;
use crate::application::dto::{EmailReceipt, MentorEmailRequest, WelcomeEmailRequest};
use crate::application::services::EmailTemplate;
use crate::infrastructure::state::AppState;

/// Send the "your mentor is ready" email
pub async fn send_mentor_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MentorEmailRequest>, JsonRejection>,
) -> ApiResult<Json<EmailReceipt>> {
    let Json(request) = payload?;
    let template = EmailTemplate::mentor_ready(request)?;
    let receipt = state.notification_service.send(template).await?;
    Ok(Json(receipt))
}

/// Send the waitlist welcome email
pub async fn send_welcome_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WelcomeEmailRequest>, JsonRejection>,
) -> ApiResult<Json<EmailReceipt>> {
    let Json(request) = payload?;
    let template = EmailTemplate::welcome(request)?;
    let receipt = state.notification_service.send(template).await?;
    Ok(Json(receipt))
}
