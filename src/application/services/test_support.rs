//! Mock ports shared by the service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::outbound::{
    CredentialKey, EmailSenderError, EmailSenderPort, GenerationRecordRepositoryPort,
    ModelGatewayError, ModelGatewayPort, OutgoingEmail, RepositoryError, WaitlistRepositoryPort,
};
use crate::domain::entities::{GenerationRecord, WaitlistEntry};

/// Scripted model gateway: one canned response or failure per model id
pub struct MockModelGateway {
    configured: bool,
    responses: HashMap<String, Result<Value, String>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockModelGateway {
    pub fn new() -> Self {
        Self {
            configured: true,
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn respond(mut self, model: &str, output: Value) -> Self {
        self.responses.insert(model.to_string(), Ok(output));
        self
    }

    pub fn fail(mut self, model: &str, body: &str) -> Self {
        self.responses.insert(model.to_string(), Err(body.to_string()));
        self
    }

    /// Model ids in call order
    pub fn called_models(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    pub fn input_for(&self, model: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == model)
            .map(|(_, input)| input.clone())
    }
}

#[async_trait]
impl ModelGatewayPort for MockModelGateway {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn run(&self, model: &str, input: Value) -> Result<Value, ModelGatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), input));

        match self.responses.get(model) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(body)) => Err(ModelGatewayError::Api {
                model: model.to_string(),
                status: 500,
                body: body.clone(),
            }),
            None => Err(ModelGatewayError::Api {
                model: model.to_string(),
                status: 404,
                body: "no mock response".to_string(),
            }),
        }
    }
}

/// Records every email and answers with a fixed outcome
pub struct MockEmailSender {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl MockEmailSender {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSenderPort for MockEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailSenderError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            Err(EmailSenderError::Api {
                status: 422,
                body: r#"{"message":"invalid from"}"#.to_string(),
            })
        } else {
            Ok("email_123".to_string())
        }
    }
}

/// In-memory repository for both signups and generation records
#[derive(Default)]
pub struct MockRepository {
    pub entries: Mutex<Vec<WaitlistEntry>>,
    pub records: Mutex<Vec<GenerationRecord>>,
    pub fail: bool,
}

impl MockRepository {
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }
}

#[async_trait]
impl WaitlistRepositoryPort for MockRepository {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Database("connection refused".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

#[async_trait]
impl GenerationRecordRepositoryPort for MockRepository {
    async fn insert(&self, record: &GenerationRecord) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Database("connection refused".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Credential map with every key set
pub fn all_credentials() -> HashMap<CredentialKey, String> {
    [
        (CredentialKey::FalKey, "fal-test"),
        (CredentialKey::ResendApiKey, "re_test"),
        (CredentialKey::SupabaseAnonKey, "anon"),
        (CredentialKey::VapiPublicKey, " pk_public \n"),
        (CredentialKey::VapiAssistantIdSteve, "asst-steve"),
        (CredentialKey::VapiAssistantIdAlbert, "asst-albert"),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.to_string()))
    .collect()
}

/// Let detached tasks spawned by the service under test run to completion
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
