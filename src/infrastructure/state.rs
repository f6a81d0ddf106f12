//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::{
    CredentialSource, EmailSenderPort, GenerationRecordRepositoryPort, ModelGatewayPort,
    WaitlistRepositoryPort,
};
use crate::application::services::{
    stylizer_for, AssistantTokenService, CharacterGenerationService, LessonService,
    NotificationService, SignupService,
};
use crate::infrastructure::config::{AppConfig, DatastoreKind, EnvCredentials};
use crate::infrastructure::fal::FalClient;
use crate::infrastructure::persistence::{SqliteRepository, SupabaseRepository};
use crate::infrastructure::resend::ResendClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub character_generation_service: CharacterGenerationService,
    pub lesson_service: LessonService,
    pub notification_service: Arc<NotificationService>,
    pub signup_service: SignupService,
    pub assistant_token_service: AssistantTokenService,
}

/// The outbound adapters a state is assembled from
pub struct Adapters {
    pub gateway: Arc<dyn ModelGatewayPort>,
    pub email_sender: Arc<dyn EmailSenderPort>,
    pub waitlist: Arc<dyn WaitlistRepositoryPort>,
    pub records: Arc<dyn GenerationRecordRepositoryPort>,
    pub credentials: Arc<dyn CredentialSource>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let credentials: Arc<dyn CredentialSource> = Arc::new(EnvCredentials);

        // Initialize fal.ai and Resend clients
        let gateway = Arc::new(
            FalClient::new(&config.fal_base_url, credentials.clone())
                .with_polling(config.fal_poll_interval(), config.fal_max_wait()),
        );
        let email_sender = Arc::new(ResendClient::new(
            &config.resend_base_url,
            credentials.clone(),
        ));

        // Initialize the datastore
        let (waitlist, records): (
            Arc<dyn WaitlistRepositoryPort>,
            Arc<dyn GenerationRecordRepositoryPort>,
        ) = match config.datastore()? {
            DatastoreKind::Supabase { url } => {
                tracing::info!("  Datastore: Supabase ({})", url);
                let repository = Arc::new(SupabaseRepository::new(&url, credentials.clone()));
                (repository.clone(), repository)
            }
            DatastoreKind::Sqlite { url } => {
                tracing::info!("  Datastore: SQLite ({})", url);
                let repository = Arc::new(
                    SqliteRepository::connect(&url)
                        .await
                        .with_context(|| format!("Failed to open SQLite database at {}", url))?,
                );
                (repository.clone(), repository)
            }
        };

        Self::from_adapters(
            config,
            Adapters {
                gateway,
                email_sender,
                waitlist,
                records,
                credentials,
            },
        )
    }

    pub fn from_adapters(config: AppConfig, adapters: Adapters) -> Result<Self> {
        let character_models = config.character_models();
        let stylizer = stylizer_for(
            config.stylize_mode()?,
            adapters.gateway.clone(),
            &character_models,
        );

        let notification_service = Arc::new(NotificationService::new(
            adapters.email_sender,
            config.email_from.clone(),
        ));
        let character_generation_service = CharacterGenerationService::new(
            adapters.gateway.clone(),
            stylizer,
            character_models.animate,
            adapters.records,
            notification_service.clone(),
        );
        let lesson_service = LessonService::new(adapters.gateway, config.lesson_models());
        let signup_service = SignupService::new(adapters.waitlist, notification_service.clone());
        let assistant_token_service = AssistantTokenService::new(adapters.credentials);

        Ok(Self {
            config,
            character_generation_service,
            lesson_service,
            notification_service,
            signup_service,
            assistant_token_service,
        })
    }
}
