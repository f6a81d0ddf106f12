//! Lesson Service - Topic to lip-synced teacher video
//!
//! Script, narrate, sync. Each stage needs the previous one's output, so any
//! failure aborts the lesson before the next vendor call.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::application::dto::{LessonRequest, LessonResult, LessonSubmission};
use crate::application::ports::outbound::{ModelGatewayError, ModelGatewayPort};
use crate::application::services::prompt_builder::{build_lesson_script_prompt, clean_script};
use crate::application::services::response_shape::{
    extract_first_str, extract_first_url, AUDIO_URL_PATHS, TEXT_OUTPUT_PATHS, VIDEO_URL_PATHS,
};

/// Hosted models and voice used for lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonModels {
    pub script: String,
    /// Underlying LLM routed through the script endpoint
    pub script_llm: String,
    pub speech: String,
    pub voice: String,
    /// ElevenLabs model behind the speech endpoint; multilingual for Turkish
    pub voice_model: String,
    pub lipsync: String,
}

impl Default for LessonModels {
    fn default() -> Self {
        Self {
            script: "fal-ai/any-llm".to_string(),
            script_llm: "google/gemini-flash-1.5".to_string(),
            speech: "fal-ai/elevenlabs/text-to-speech/eleven-v3".to_string(),
            voice: "JBFqnCBsd6RMkjVDRZzb".to_string(),
            voice_model: "eleven_multilingual_v2".to_string(),
            lipsync: "creatify/lipsync".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStage {
    Script,
    Narrate,
    Sync,
}

impl LessonStage {
    pub fn failure_detail(&self) -> &'static str {
        match self {
            Self::Script => "Failed to generate script",
            Self::Narrate => "Failed to generate audio",
            Self::Sync => "Failed to generate lip-sync video",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("API key not configured")]
    NotConfigured,
    #[error("{}", .0.failure_detail())]
    Stage(LessonStage),
}

impl LessonError {
    fn from_vendor(stage: LessonStage, err: ModelGatewayError) -> Self {
        if let ModelGatewayError::NotConfigured = err {
            return Self::NotConfigured;
        }
        error!(?stage, error = %err, "Model call failed");
        Self::Stage(stage)
    }
}

pub struct LessonService {
    gateway: Arc<dyn ModelGatewayPort>,
    models: LessonModels,
}

impl LessonService {
    pub fn new(gateway: Arc<dyn ModelGatewayPort>, models: LessonModels) -> Self {
        Self { gateway, models }
    }

    /// Validate a browser submission and run the lesson pipeline
    pub async fn generate_lesson(
        &self,
        submission: LessonSubmission,
    ) -> Result<LessonResult, LessonError> {
        if !self.gateway.is_configured() {
            error!("FAL_KEY not found in environment");
            return Err(LessonError::NotConfigured);
        }

        let request = submission.into_request().ok_or_else(|| {
            LessonError::InvalidInput("Video URL and topic prompt are required".to_string())
        })?;

        self.run(request).await
    }

    #[instrument(skip_all, fields(precomputed = request.script_is_precomputed))]
    pub async fn run(&self, request: LessonRequest) -> Result<LessonResult, LessonError> {
        let (script, generated_script) = if request.script_is_precomputed {
            (request.topic_or_script.clone(), None)
        } else {
            let script = self.write_script(&request.topic_or_script).await?;
            (script.clone(), Some(script))
        };

        let audio_url = self.narrate(&script).await?;
        let video_url = self.lip_sync(&request.reference_video_url, &audio_url).await?;
        info!(video_url = %video_url, "Lesson video ready");

        Ok(LessonResult {
            success: true,
            generated_script,
            audio_url: Some(audio_url),
            narrated_video_url: video_url,
        })
    }

    async fn write_script(&self, topic: &str) -> Result<String, LessonError> {
        debug!(topic = %topic, "Generating lesson script");
        let output = self
            .gateway
            .run(
                &self.models.script,
                json!({
                    "model": self.models.script_llm,
                    "prompt": build_lesson_script_prompt(topic),
                }),
            )
            .await
            .map_err(|e| LessonError::from_vendor(LessonStage::Script, e))?;

        let script = extract_first_str(&output, TEXT_OUTPUT_PATHS)
            .map(clean_script)
            .unwrap_or_default();

        if script.is_empty() {
            error!(response = %output, "Script model returned no text");
            return Err(LessonError::Stage(LessonStage::Script));
        }
        Ok(script)
    }

    async fn narrate(&self, script: &str) -> Result<String, LessonError> {
        debug!(chars = script.len(), "Generating audio");
        let output = self
            .gateway
            .run(
                &self.models.speech,
                json!({
                    "text": script,
                    "voice": self.models.voice,
                    "model_id": self.models.voice_model,
                }),
            )
            .await
            .map_err(|e| LessonError::from_vendor(LessonStage::Narrate, e))?;

        extract_first_url(&output, AUDIO_URL_PATHS).ok_or_else(|| {
            error!(response = %output, "Speech model returned no audio");
            LessonError::Stage(LessonStage::Narrate)
        })
    }

    async fn lip_sync(&self, video_url: &str, audio_url: &str) -> Result<String, LessonError> {
        debug!(audio_url = %audio_url, "Creating lip-sync video");
        let output = self
            .gateway
            .run(
                &self.models.lipsync,
                json!({
                    "video_url": video_url,
                    "audio_url": audio_url,
                }),
            )
            .await
            .map_err(|e| LessonError::from_vendor(LessonStage::Sync, e))?;

        extract_first_url(&output, VIDEO_URL_PATHS).ok_or_else(|| {
            error!(response = %output, "Lip-sync model returned no video");
            LessonError::Stage(LessonStage::Sync)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::MockModelGateway;

    const SOURCE_VIDEO: &str = "https://v.mp4";
    const AUDIO: &str = "https://fal.media/files/lesson.mp3";
    const SYNCED: &str = "https://fal.media/files/lesson.mp4";

    fn happy_gateway() -> MockModelGateway {
        let models = LessonModels::default();
        MockModelGateway::new()
            .respond(&models.script, json!({"output": "\"Merhaba çocuklar! Bugün toplama öğreniyoruz.\""}))
            .respond(&models.speech, json!({"audio": {"url": AUDIO}}))
            .respond(&models.lipsync, json!({"video": {"url": SYNCED}}))
    }

    fn lesson_service(gateway: MockModelGateway) -> (Arc<MockModelGateway>, LessonService) {
        let gateway = Arc::new(gateway);
        let service = LessonService::new(gateway.clone(), LessonModels::default());
        (gateway, service)
    }

    fn topic_submission() -> LessonSubmission {
        LessonSubmission {
            video_url: Some(SOURCE_VIDEO.to_string()),
            topic_prompt: Some("Addition for kids".to_string()),
            lesson_script: None,
        }
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let (gateway, service) = lesson_service(happy_gateway());

        let result = service.generate_lesson(topic_submission()).await.unwrap();

        assert_eq!(
            result,
            LessonResult {
                success: true,
                generated_script: Some("Merhaba çocuklar! Bugün toplama öğreniyoruz.".to_string()),
                audio_url: Some(AUDIO.to_string()),
                narrated_video_url: SYNCED.to_string(),
            }
        );

        let models = LessonModels::default();
        assert_eq!(
            gateway.called_models(),
            vec![models.script.clone(), models.speech.clone(), models.lipsync.clone()]
        );
        let speech = gateway.input_for(&models.speech).unwrap();
        assert_eq!(speech["text"], "Merhaba çocuklar! Bugün toplama öğreniyoruz.");
        assert_eq!(speech["voice"], models.voice);
        assert_eq!(speech["model_id"], "eleven_multilingual_v2");
        let sync = gateway.input_for(&models.lipsync).unwrap();
        assert_eq!(sync["video_url"], SOURCE_VIDEO);
        assert_eq!(sync["audio_url"], AUDIO);
    }

    #[tokio::test]
    async fn test_precomputed_script_skips_script_stage() {
        let (gateway, service) = lesson_service(happy_gateway());
        let submission = LessonSubmission {
            video_url: Some(SOURCE_VIDEO.to_string()),
            topic_prompt: None,
            lesson_script: Some("Bugün renkleri öğreniyoruz.".to_string()),
        };

        let result = service.generate_lesson(submission).await.unwrap();

        assert!(result.generated_script.is_none());
        let models = LessonModels::default();
        assert_eq!(gateway.called_models(), vec![models.speech.clone(), models.lipsync]);
        assert_eq!(
            gateway.input_for(&models.speech).unwrap()["text"],
            "Bugün renkleri öğreniyoruz."
        );
    }

    #[tokio::test]
    async fn test_empty_script_aborts_before_narration() {
        let models = LessonModels::default();
        for output in [json!({"output": ""}), json!({"output": "  \"\"  "}), json!({})] {
            let (gateway, service) = lesson_service(happy_gateway().respond(&models.script, output));

            let err = service.generate_lesson(topic_submission()).await.unwrap_err();

            assert!(matches!(err, LessonError::Stage(LessonStage::Script)));
            assert_eq!(err.to_string(), "Failed to generate script");
            assert_eq!(gateway.called_models(), vec![models.script.clone()]);
        }
    }

    #[tokio::test]
    async fn test_unrecognized_audio_shape_fails() {
        let models = LessonModels::default();
        let gateway = happy_gateway().respond(&models.speech, json!({"status": "COMPLETED"}));
        let (gateway, service) = lesson_service(gateway);

        let err = service.generate_lesson(topic_submission()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate audio");
        assert!(!gateway.called_models().contains(&models.lipsync));
    }

    #[tokio::test]
    async fn test_alternate_response_shapes_are_accepted() {
        let models = LessonModels::default();
        let gateway = happy_gateway()
            .respond(&models.speech, json!({"audio_url": AUDIO}))
            .respond(&models.lipsync, json!({"output": {"video": {"url": SYNCED}}}));
        let (_, service) = lesson_service(gateway);

        let result = service.generate_lesson(topic_submission()).await.unwrap();

        assert_eq!(result.audio_url.as_deref(), Some(AUDIO));
        assert_eq!(result.narrated_video_url, SYNCED);
    }

    #[tokio::test]
    async fn test_missing_sync_video_fails() {
        let models = LessonModels::default();
        let gateway = happy_gateway().respond(&models.lipsync, json!({"request_id": "abc"}));
        let (_, service) = lesson_service(gateway);

        let err = service.generate_lesson(topic_submission()).await.unwrap_err();

        assert!(matches!(err, LessonError::Stage(LessonStage::Sync)));
    }

    #[tokio::test]
    async fn test_vendor_failure_in_narration() {
        let models = LessonModels::default();
        let gateway = happy_gateway().fail(&models.speech, "voice not found");
        let (_, service) = lesson_service(gateway);

        let err = service.generate_lesson(topic_submission()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate audio");
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_without_calls() {
        let (gateway, service) = lesson_service(happy_gateway());
        let submission = LessonSubmission {
            video_url: Some(SOURCE_VIDEO.to_string()),
            ..Default::default()
        };

        let err = service.generate_lesson(submission).await.unwrap_err();

        assert_eq!(err.to_string(), "Video URL and topic prompt are required");
        assert!(gateway.called_models().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_gateway() {
        let (_, service) = lesson_service(MockModelGateway::unconfigured());

        let err = service.generate_lesson(topic_submission()).await.unwrap_err();

        assert!(matches!(err, LessonError::NotConfigured));
    }
}
