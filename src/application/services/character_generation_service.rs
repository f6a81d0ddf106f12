//! Character Generation Service - Drawing to mentor character (and video)
//!
//! A strictly sequential pipeline of hosted model calls:
//!
//! 1. Fast path: a previously generated character plus a video request
//!    skips straight to animation.
//! 2. Stylize: turn the drawing into a 3D mentor image. Two interchangeable
//!    strategies exist, describe-then-generate and direct image edit.
//! 3. Animate: optional short video of the mentor talking about a topic.
//!    A failure here degrades the result instead of failing it.
//! 4. Side effects: persist a record and email the parent. Detached from the
//!    response; failures are only logged.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use crate::application::dto::{GenerationRequest, GenerationResult};
use crate::application::ports::outbound::{
    GenerationRecordRepositoryPort, ModelGatewayError, ModelGatewayPort,
};
use crate::application::services::notification_service::{EmailTemplate, NotificationService};
use crate::application::services::prompt_builder::{
    build_animate_prompt, build_describe_prompt, build_edit_prompt, build_recreate_prompt,
    FALLBACK_DESCRIPTION,
};
use crate::application::services::response_shape::{
    extract_first_str, extract_first_url, IMAGE_URL_PATHS, TEXT_OUTPUT_PATHS, VIDEO_URL_PATHS,
};
use crate::domain::entities::GenerationRecord;
use crate::domain::value_objects::GenerationRecordId;

/// Hosted model ids used by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterModels {
    pub describe: String,
    pub generate: String,
    pub edit: String,
    pub animate: String,
}

impl Default for CharacterModels {
    fn default() -> Self {
        Self {
            describe: "fal-ai/llava-next".to_string(),
            generate: "fal-ai/nano-banana-pro".to_string(),
            edit: "fal-ai/nano-banana-pro/edit".to_string(),
            animate: "fal-ai/sora-2/image-to-video".to_string(),
        }
    }
}

/// How the drawing becomes a character image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylizeMode {
    /// Vision model writes a description, text-to-image model renders it
    #[default]
    DescribeThenGenerate,
    /// Image-conditioned edit model works on the drawing directly
    DirectEdit,
}

impl FromStr for StylizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "describe" | "describe-then-generate" => Ok(Self::DescribeThenGenerate),
            "edit" | "direct-edit" => Ok(Self::DirectEdit),
            other => Err(format!("Unknown stylize mode: {}", other)),
        }
    }
}

/// Pipeline stage that talks to a hosted model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Describe,
    Stylize,
    Animate,
}

impl GenerationStage {
    /// Client-safe description of a failure in this stage
    pub fn failure_detail(&self) -> &'static str {
        match self {
            Self::Describe => "Drawing analysis failed",
            Self::Stylize => "Image generation failed",
            Self::Animate => "Video generation failed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("API key not configured")]
    NotConfigured,
    #[error("{detail}")]
    Stage {
        stage: GenerationStage,
        detail: String,
    },
}

impl GenerationError {
    fn stage(stage: GenerationStage, detail: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            detail: detail.into(),
        }
    }

    /// Log the vendor's own error and keep it out of the client-facing error
    fn from_vendor(stage: GenerationStage, err: ModelGatewayError) -> Self {
        if let ModelGatewayError::NotConfigured = err {
            error!("Generation credential disappeared mid-request");
            return Self::NotConfigured;
        }
        error!(?stage, error = %err, "Model call failed");
        Self::stage(stage, stage.failure_detail())
    }
}

/// Output of the stylize stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylizedCharacter {
    pub description: Option<String>,
    pub image_url: String,
}

/// One way of turning a drawing into a character image
#[async_trait]
pub trait Stylizer: Send + Sync {
    async fn stylize(&self, drawing: &str) -> Result<StylizedCharacter, GenerationError>;
}

pub fn stylizer_for(
    mode: StylizeMode,
    gateway: Arc<dyn ModelGatewayPort>,
    models: &CharacterModels,
) -> Arc<dyn Stylizer> {
    match mode {
        StylizeMode::DescribeThenGenerate => Arc::new(DescribeThenGenerate {
            gateway,
            describe_model: models.describe.clone(),
            generate_model: models.generate.clone(),
        }),
        StylizeMode::DirectEdit => Arc::new(DirectImageEdit {
            gateway,
            edit_model: models.edit.clone(),
        }),
    }
}

pub struct DescribeThenGenerate {
    gateway: Arc<dyn ModelGatewayPort>,
    describe_model: String,
    generate_model: String,
}

impl DescribeThenGenerate {
    /// Never empty: a blank answer becomes the fallback description
    async fn describe(&self, drawing: &str) -> Result<String, GenerationError> {
        debug!("Analyzing drawing");
        let output = self
            .gateway
            .run(
                &self.describe_model,
                json!({
                    "image_url": drawing,
                    "prompt": build_describe_prompt(),
                }),
            )
            .await
            .map_err(|e| GenerationError::from_vendor(GenerationStage::Describe, e))?;

        match extract_first_str(&output, TEXT_OUTPUT_PATHS) {
            Some(description) => Ok(description.to_string()),
            None => {
                warn!("Vision model returned no description, using fallback");
                Ok(FALLBACK_DESCRIPTION.to_string())
            }
        }
    }
}

#[async_trait]
impl Stylizer for DescribeThenGenerate {
    async fn stylize(&self, drawing: &str) -> Result<StylizedCharacter, GenerationError> {
        let description = self.describe(drawing).await?;
        debug!(description = %description, "Generating mentor character");

        let output = self
            .gateway
            .run(
                &self.generate_model,
                json!({
                    "prompt": build_recreate_prompt(&description),
                    "aspect_ratio": "1:1",
                    "resolution": "1K",
                }),
            )
            .await
            .map_err(|e| GenerationError::from_vendor(GenerationStage::Stylize, e))?;

        let image_url = first_image_url(&output)?;
        Ok(StylizedCharacter {
            description: Some(description),
            image_url,
        })
    }
}

pub struct DirectImageEdit {
    gateway: Arc<dyn ModelGatewayPort>,
    edit_model: String,
}

#[async_trait]
impl Stylizer for DirectImageEdit {
    async fn stylize(&self, drawing: &str) -> Result<StylizedCharacter, GenerationError> {
        debug!("Editing drawing into mentor character");
        let output = self
            .gateway
            .run(
                &self.edit_model,
                json!({
                    "prompt": build_edit_prompt(),
                    "image_urls": [drawing],
                    "aspect_ratio": "1:1",
                    "resolution": "1K",
                }),
            )
            .await
            .map_err(|e| GenerationError::from_vendor(GenerationStage::Stylize, e))?;

        Ok(StylizedCharacter {
            description: None,
            image_url: first_image_url(&output)?,
        })
    }
}

fn first_image_url(output: &serde_json::Value) -> Result<String, GenerationError> {
    extract_first_url(output, IMAGE_URL_PATHS).ok_or_else(|| {
        error!(response = %output, "Image model returned no image");
        GenerationError::stage(GenerationStage::Stylize, "Image generation returned no image")
    })
}

pub struct CharacterGenerationService {
    gateway: Arc<dyn ModelGatewayPort>,
    stylizer: Arc<dyn Stylizer>,
    animate_model: String,
    records: Arc<dyn GenerationRecordRepositoryPort>,
    notifications: Arc<NotificationService>,
}

impl CharacterGenerationService {
    pub fn new(
        gateway: Arc<dyn ModelGatewayPort>,
        stylizer: Arc<dyn Stylizer>,
        animate_model: impl Into<String>,
        records: Arc<dyn GenerationRecordRepositoryPort>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            gateway,
            stylizer,
            animate_model: animate_model.into(),
            records,
            notifications,
        }
    }

    #[instrument(skip_all, fields(fast_path = request.is_fast_path(), wants_video = request.wants_video))]
    pub async fn generate_character(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        if !self.gateway.is_configured() {
            error!("FAL_KEY not found in environment");
            return Err(GenerationError::NotConfigured);
        }

        if let (true, Some(reference)) = (request.wants_video, request.reference_character_image())
        {
            let topic = request.learning_topic().ok_or_else(|| {
                GenerationError::InvalidInput(
                    "Learning prompt is required for video generation".to_string(),
                )
            })?;
            info!("Direct video generation with existing character");
            let video_url = self.animate(reference, topic).await?;
            return Ok(GenerationResult {
                success: true,
                video_url: Some(video_url),
                ..Default::default()
            });
        }

        let drawing = request
            .image()
            .ok_or_else(|| GenerationError::InvalidInput("Image is required".to_string()))?;

        let stylized = self.stylizer.stylize(drawing).await?;
        info!(image_url = %stylized.image_url, "Mentor character generated");

        let mut video_url = None;
        if request.wants_video {
            if let Some(topic) = request.learning_topic() {
                match self.animate(&stylized.image_url, topic).await {
                    Ok(url) => video_url = Some(url),
                    Err(e) => warn!(error = %e, "Video generation failed, returning image only"),
                }
            }
        }

        self.spawn_side_effects(&request, drawing, &stylized);

        Ok(GenerationResult {
            success: true,
            description: stylized.description,
            character_image_url: Some(stylized.image_url),
            video_url,
        })
    }

    async fn animate(&self, image_url: &str, topic: &str) -> Result<String, GenerationError> {
        debug!(topic = %topic, "Generating educational video");
        let output = self
            .gateway
            .run(
                &self.animate_model,
                json!({
                    "prompt": build_animate_prompt(topic),
                    "image_url": image_url,
                }),
            )
            .await
            .map_err(|e| GenerationError::from_vendor(GenerationStage::Animate, e))?;

        extract_first_url(&output, VIDEO_URL_PATHS).ok_or_else(|| {
            error!(response = %output, "Video model returned no video");
            GenerationError::stage(GenerationStage::Animate, "Video generation returned no video")
        })
    }

    fn spawn_side_effects(
        &self,
        request: &GenerationRequest,
        drawing: &str,
        stylized: &StylizedCharacter,
    ) {
        let record = GenerationRecord {
            id: GenerationRecordId::new(),
            child_name: request.subject_name().map(String::from),
            email: request.notify_email().map(String::from),
            original_drawing: drawing.to_string(),
            drawing_description: stylized.description.clone(),
            character_image_url: stylized.image_url.clone(),
            created_at: Utc::now(),
        };

        let email = request.notify_email().map(|to| EmailTemplate::MentorReady {
            to: to.to_string(),
            child_name: request.subject_name().map(String::from),
            original_drawing: Some(drawing.to_string()),
            mentor_image_url: stylized.image_url.clone(),
        });

        tokio::spawn(record_and_notify(
            self.records.clone(),
            self.notifications.clone(),
            record,
            email,
        ));
    }
}

/// Best-effort persistence and notification. Never fails.
pub(crate) async fn record_and_notify(
    records: Arc<dyn GenerationRecordRepositoryPort>,
    notifications: Arc<NotificationService>,
    record: GenerationRecord,
    email: Option<EmailTemplate>,
) {
    match records.insert(&record).await {
        Ok(()) => debug!(record_id = %record.id, "Generation record stored"),
        Err(e) => warn!(record_id = %record.id, error = %e, "Failed to store generation record"),
    }

    if let Some(template) = email {
        if let Err(e) = notifications.send(template).await {
            warn!(record_id = %record.id, error = %e, "Failed to send mentor-ready email");
        }
    }
}
