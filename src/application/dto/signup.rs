use serde::{Deserialize, Serialize};

use crate::domain::entities::WaitlistEntry;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub id: String,
    pub submitted_at: String,
}

impl From<&WaitlistEntry> for SignupResponse {
    fn from(entry: &WaitlistEntry) -> Self {
        Self {
            success: true,
            id: entry.id.to_string(),
            submitted_at: entry.submitted_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantTokenRequest {
    #[serde(default)]
    pub assistant: Option<String>,
}
