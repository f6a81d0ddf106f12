//! Resend client for transactional email

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{
    CredentialKey, CredentialSource, EmailSenderError, EmailSenderPort, OutgoingEmail,
};

pub struct ResendClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl ResendClient {
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl<'a> From<&'a OutgoingEmail> for SendEmailBody<'a> {
    fn from(email: &'a OutgoingEmail) -> Self {
        Self {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[async_trait]
impl EmailSenderPort for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailSenderError> {
        let key = self
            .credentials
            .get(CredentialKey::ResendApiKey)
            .ok_or(EmailSenderError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(key.trim())
            .json(&SendEmailBody::from(email))
            .send()
            .await
            .map_err(|e| EmailSenderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailSenderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| EmailSenderError::Http(e.to_string()))?;
        Ok(sent.id)
    }
}
