use serde::{Deserialize, Serialize};

/// Body of a character generation request.
///
/// Either `image` (a drawing, usually a PNG data URL) or
/// `reference_character_image` (a previously generated mentor) must be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default, rename = "imageBase64")]
    pub image: Option<String>,
    #[serde(default, rename = "characterImageUrl")]
    pub reference_character_image: Option<String>,
    #[serde(default, rename = "learningPrompt")]
    pub learning_topic: Option<String>,
    #[serde(default, rename = "generateVideo")]
    pub wants_video: bool,
    #[serde(default, rename = "email")]
    pub notify_email: Option<String>,
    #[serde(default, rename = "childName")]
    pub subject_name: Option<String>,
}

impl GenerationRequest {
    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }

    pub fn reference_character_image(&self) -> Option<&str> {
        non_blank(&self.reference_character_image)
    }

    pub fn learning_topic(&self) -> Option<&str> {
        non_blank(&self.learning_topic)
    }

    pub fn notify_email(&self) -> Option<&str> {
        non_blank(&self.notify_email)
    }

    pub fn subject_name(&self) -> Option<&str> {
        non_blank(&self.subject_name)
    }

    /// A reference image plus a video request skips straight to animation
    pub fn is_fast_path(&self) -> bool {
        self.wants_video && self.reference_character_image().is_some()
    }
}

/// Successful outcome of the character pipeline.
///
/// Side effects (persistence, email) are deliberately not represented here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(rename = "drawingDescription", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_image_url: Option<String>,
    pub video_url: Option<String>,
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
