use serde::{Deserialize, Serialize};

/// Mentor-ready email request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorEmailRequest {
    #[serde(default)]
    pub to_email: Option<String>,
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub original_drawing: Option<String>,
    #[serde(default)]
    pub mentor_image_url: Option<String>,
}

/// Waitlist welcome email request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeEmailRequest {
    #[serde(default)]
    pub to_email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReceipt {
    pub success: bool,
    pub email_id: String,
}
