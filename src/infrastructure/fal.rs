//! fal.ai client for hosted model inference
//!
//! Requests go through the fal queue: submit, poll the status URL until the
//! job completes, then fetch the result. Video jobs run for minutes, so no
//! single HTTP request is held open for the whole job.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use crate::application::ports::outbound::{
    CredentialKey, CredentialSource, ModelGatewayError, ModelGatewayPort,
};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(15 * 60);

/// Client for the fal.ai queue API
pub struct FalClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
    poll_interval: Duration,
    max_wait: Duration,
}

#[derive(Debug, Deserialize)]
struct QueueSubmission {
    request_id: String,
    status_url: String,
    response_url: String,
}

#[derive(Debug, Deserialize)]
struct QueueStatus {
    status: String,
}

impl FalClient {
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_wait: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.max_wait = max_wait;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model.trim_start_matches('/'))
    }

    /// Send an authorized request and decode the JSON body of a 2xx answer
    async fn call(
        &self,
        request: RequestBuilder,
        model: &str,
        key: &str,
    ) -> Result<Value, ModelGatewayError> {
        let http_error = |e: reqwest::Error| ModelGatewayError::Http {
            model: model.to_string(),
            message: e.to_string(),
        };

        let response = request
            .header(AUTHORIZATION, format!("Key {}", key))
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelGatewayError::Api {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(http_error)
    }

    fn decode<T: serde::de::DeserializeOwned>(
        model: &str,
        value: Value,
    ) -> Result<T, ModelGatewayError> {
        serde_json::from_value(value).map_err(|e| ModelGatewayError::Http {
            model: model.to_string(),
            message: format!("Unexpected queue response: {}", e),
        })
    }
}

#[async_trait]
impl ModelGatewayPort for FalClient {
    fn is_configured(&self) -> bool {
        self.credentials.get(CredentialKey::FalKey).is_some()
    }

    async fn run(&self, model: &str, input: Value) -> Result<Value, ModelGatewayError> {
        let key = self
            .credentials
            .get(CredentialKey::FalKey)
            .ok_or(ModelGatewayError::NotConfigured)?;
        let key = key.trim();

        let submitted = self
            .call(self.client.post(self.endpoint(model)).json(&input), model, key)
            .await?;
        let submission: QueueSubmission = Self::decode(model, submitted)?;
        debug!(model, request_id = %submission.request_id, "Queued hosted model request");

        let deadline = Instant::now() + self.max_wait;
        loop {
            let status: QueueStatus = Self::decode(
                model,
                self.call(self.client.get(&submission.status_url), model, key)
                    .await?,
            )?;
            if status.status == "COMPLETED" {
                break;
            }
            if Instant::now() >= deadline {
                return Err(ModelGatewayError::Http {
                    model: model.to_string(),
                    message: format!(
                        "Request {} still {} after {}s",
                        submission.request_id,
                        status.status,
                        self.max_wait.as_secs()
                    ),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        debug!(model, request_id = %submission.request_id, "Hosted model request completed");
        self.call(self.client.get(&submission.response_url), model, key)
            .await
    }
}
