use async_trait::async_trait;

/// Errors raised by a hosted model call
#[derive(Debug, thiserror::Error)]
pub enum ModelGatewayError {
    #[error("Generation credential is not configured")]
    NotConfigured,
    #[error("HTTP request to {model} failed: {message}")]
    Http { model: String, message: String },
    #[error("Model {model} returned status {status}: {body}")]
    Api {
        model: String,
        status: u16,
        body: String,
    },
}

/// Blocking call to a hosted inference endpoint.
///
/// Input and output are the model's own JSON shapes. Callers own the
/// knowledge of which fields a given model expects and returns.
#[async_trait]
pub trait ModelGatewayPort: Send + Sync {
    /// Whether the gateway has a credential right now
    fn is_configured(&self) -> bool;

    async fn run(
        &self,
        model: &str,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ModelGatewayError>;
}
