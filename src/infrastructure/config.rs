//! Application configuration
//!
//! Startup settings come from defaults overridden by environment variables.
//! Secrets are not part of `AppConfig`: they are read per request through
//! [`EnvCredentials`] so a rotated key takes effect without a restart.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{CredentialKey, CredentialSource};
use crate::application::services::{CharacterModels, LessonModels, StylizeMode};

/// Application configuration loaded from environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// fal.ai queue endpoint
    pub fal_base_url: String,
    /// Delay between queue status checks
    pub fal_poll_interval_ms: u64,
    /// Longest a single queued model call may take
    pub fal_max_wait_secs: u64,
    /// `describe` or `edit`
    pub stylize_mode: String,
    pub describe_model: String,
    pub generate_model: String,
    pub edit_model: String,
    pub animate_model: String,
    pub script_model: String,
    pub script_llm: String,
    pub speech_model: String,
    pub speech_voice: String,
    pub speech_model_id: String,
    pub lipsync_model: String,

    /// Resend API base URL
    pub resend_base_url: String,
    /// Sender shown on every outgoing email
    pub email_from: String,

    /// `supabase`, `sqlite` or `auto` (Supabase when a URL is set)
    pub datastore: String,
    /// Supabase project URL
    pub supabase_url: String,
    /// SQLite connection string for the local store
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let character = CharacterModels::default();
        let lesson = LessonModels::default();
        Self {
            server_port: 3000,
            fal_base_url: "https://queue.fal.run".to_string(),
            fal_poll_interval_ms: 1000,
            fal_max_wait_secs: 900,
            stylize_mode: "describe".to_string(),
            describe_model: character.describe,
            generate_model: character.generate,
            edit_model: character.edit,
            animate_model: character.animate,
            script_model: lesson.script,
            script_llm: lesson.script_llm,
            speech_model: lesson.speech,
            speech_voice: lesson.voice,
            speech_model_id: lesson.voice_model,
            lipsync_model: lesson.lipsync,
            resend_base_url: "https://api.resend.com".to_string(),
            email_from: "Scrollio <info@scrollio.co>".to_string(),
            datastore: "auto".to_string(),
            supabase_url: String::new(),
            database_url: "sqlite:scrollio.db?mode=rwc".to_string(),
        }
    }
}

/// Where signups and generation records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatastoreKind {
    Supabase { url: String },
    Sqlite { url: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(
                config::Config::try_from(&Self::default())
                    .context("Failed to build default configuration")?,
            )
            .add_source(config::Environment::default())
            .build()
            .context("Failed to read configuration from environment")?
            .try_deserialize()
            .context("Invalid configuration value")?;

        config.stylize_mode()?;
        config.datastore()?;
        Ok(config)
    }

    pub fn stylize_mode(&self) -> Result<StylizeMode> {
        self.stylize_mode
            .parse::<StylizeMode>()
            .map_err(|e| anyhow::anyhow!("STYLIZE_MODE must be `describe` or `edit`: {}", e))
    }

    pub fn datastore(&self) -> Result<DatastoreKind> {
        let supabase = || DatastoreKind::Supabase {
            url: self.supabase_url.trim_end_matches('/').to_string(),
        };
        let sqlite = || DatastoreKind::Sqlite {
            url: self.database_url.clone(),
        };

        match self.datastore.trim().to_lowercase().as_str() {
            "supabase" if self.supabase_url.trim().is_empty() => {
                anyhow::bail!("DATASTORE=supabase requires SUPABASE_URL")
            }
            "supabase" => Ok(supabase()),
            "sqlite" => Ok(sqlite()),
            "auto" | "" if self.supabase_url.trim().is_empty() => Ok(sqlite()),
            "auto" | "" => Ok(supabase()),
            other => anyhow::bail!("Unknown DATASTORE: {}", other),
        }
    }

    pub fn fal_poll_interval(&self) -> Duration {
        Duration::from_millis(self.fal_poll_interval_ms)
    }

    pub fn fal_max_wait(&self) -> Duration {
        Duration::from_secs(self.fal_max_wait_secs)
    }

    pub fn character_models(&self) -> CharacterModels {
        CharacterModels {
            describe: self.describe_model.clone(),
            generate: self.generate_model.clone(),
            edit: self.edit_model.clone(),
            animate: self.animate_model.clone(),
        }
    }

    pub fn lesson_models(&self) -> LessonModels {
        LessonModels {
            script: self.script_model.clone(),
            script_llm: self.script_llm.clone(),
            speech: self.speech_model.clone(),
            voice: self.speech_voice.clone(),
            voice_model: self.speech_model_id.clone(),
            lipsync: self.lipsync_model.clone(),
        }
    }
}

/// Reads secrets from the process environment on every lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn get(&self, key: CredentialKey) -> Option<String> {
        env::var(key.env_var())
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}
