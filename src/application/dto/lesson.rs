use serde::{Deserialize, Serialize};

use super::generation::non_blank;

/// Body of a teacher lesson request as the browser sends it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSubmission {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub topic_prompt: Option<String>,
    /// Older clients send a finished script instead of a topic
    #[serde(default)]
    pub lesson_script: Option<String>,
}

/// A validated lesson request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRequest {
    pub reference_video_url: String,
    pub topic_or_script: String,
    pub script_is_precomputed: bool,
}

impl LessonSubmission {
    /// A topic wins over a legacy script when both are present
    pub fn into_request(self) -> Option<LessonRequest> {
        let reference_video_url = non_blank(&self.video_url)?.to_string();

        if let Some(topic) = non_blank(&self.topic_prompt) {
            return Some(LessonRequest {
                reference_video_url,
                topic_or_script: topic.to_string(),
                script_is_precomputed: false,
            });
        }

        non_blank(&self.lesson_script).map(|script| LessonRequest {
            reference_video_url,
            topic_or_script: script.to_string(),
            script_is_precomputed: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(rename = "videoUrl")]
    pub narrated_video_url: String,
}
