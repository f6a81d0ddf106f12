//! GenerationRecord entity - What a finished mentor generation leaves behind

use chrono::{DateTime, Utc};

use crate::domain::value_objects::GenerationRecordId;

/// Captures the drawing, the generated mentor and who asked for it
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub id: GenerationRecordId,
    pub child_name: Option<String>,
    pub email: Option<String>,
    /// The submitted drawing, usually a base64 data URL
    pub original_drawing: String,
    pub drawing_description: Option<String>,
    pub character_image_url: String,
    pub created_at: DateTime<Utc>,
}
